//! Serializable navigation output consumed by templates.

use rw_config::{
    MenuItemSpec, MenuSpec, NavigationFooterSpec, NavigationRegionSpec, RenderContextSpec,
};
use serde::{Deserialize, Serialize};

/// Global navigation merged with the active profile for one context.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNavigation {
    /// Name of the applied profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub menus: Vec<MenuSpec>,
    pub actions: Vec<MenuItemSpec>,
    pub regions: Vec<NavigationRegionSpec>,
    pub footer: NavigationFooterSpec,
}

impl ResolvedNavigation {
    #[must_use]
    pub fn menu(&self, name: &str) -> Option<&MenuSpec> {
        self.menus.iter().find(|m| m.name == name)
    }
}

/// Navigation visible on one surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceNavigation {
    pub name: String,
    /// Added by inference rather than declared.
    pub inferred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub context: RenderContextSpec,
    pub primary_menu: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_menu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_menu: Option<String>,
    /// Only the menus this surface names, plus `footer*` menus.
    pub menus: Vec<MenuSpec>,
    pub actions: Vec<MenuItemSpec>,
    pub regions: Vec<NavigationRegionSpec>,
    pub footer: NavigationFooterSpec,
}

impl SurfaceNavigation {
    #[must_use]
    pub fn menu(&self, name: &str) -> Option<&MenuSpec> {
        self.menus.iter().find(|m| m.name == name)
    }
}

/// Navigation for every surface of a site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationModel {
    pub surfaces: Vec<SurfaceNavigation>,
}

impl NavigationModel {
    #[must_use]
    pub fn surface(&self, name: &str) -> Option<&SurfaceNavigation> {
        self.surfaces.iter().find(|s| s.name == name)
    }
}
