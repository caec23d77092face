//! Declarative navigation tree: menus, actions, regions, footer, profiles
//! and rendering surfaces.
//!
//! Everything here is plain data. Visibility predicates are carried through
//! to the renderer unevaluated.
//!
//! # Example
//!
//! ```toml
//! [[navigation.menus]]
//! name = "main"
//! items = [{ label = "Docs", url = "/docs/" }]
//!
//! [[navigation.profiles]]
//! name = "docs"
//! priority = 10
//! match = { collections = ["docs"] }
//! merge = { menus = "replace" }
//! menus = [{ name = "main", items = [{ label = "Guide", url = "/docs/guide/" }] }]
//!
//! [[navigation.surfaces]]
//! name = "docs"
//! context = { path = "/docs/", collection = "docs" }
//! primary_menu = "main"
//! sidebar_menu = "docs-sidebar"
//! ```

use serde::{Deserialize, Serialize};

/// Navigation section of the site specification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSpec {
    /// Global named menus.
    pub menus: Vec<MenuSpec>,
    /// Global call-to-action links.
    pub actions: Vec<MenuItemSpec>,
    /// Global named layout regions.
    pub regions: Vec<NavigationRegionSpec>,
    /// Global footer.
    pub footer: NavigationFooterSpec,
    /// Context-matched override bundles.
    pub profiles: Vec<NavigationProfileSpec>,
    /// Explicitly declared rendering surfaces.
    pub surfaces: Vec<NavigationSurfaceSpec>,
}

/// Visibility predicate evaluated by the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layouts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_collections: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_layouts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_projects: Vec<String>,
}

/// Single navigation link, optionally nested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemSpec {
    /// Display label.
    pub label: String,
    /// Link target. `None` for pure grouping nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Opens outside the site.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItemSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilitySpec>,
}

/// Named menu.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSpec {
    /// Menu identifier referenced by surfaces (e.g. "main", "footer-legal").
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub items: Vec<MenuItemSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilitySpec>,
}

/// Named layout region (e.g. "header-right", "announcement").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationRegionSpec {
    pub name: String,
    pub items: Vec<MenuItemSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilitySpec>,
}

/// Footer column with a title and links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumnSpec {
    pub title: String,
    pub items: Vec<MenuItemSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilitySpec>,
}

/// Site footer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationFooterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<FooterColumnSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilitySpec>,
}

impl NavigationFooterSpec {
    /// True when the footer carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.copyright.is_none() && self.columns.is_empty()
    }
}

/// How a profile axis combines with the global content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPolicy {
    /// Profile content replaces the global content for this axis.
    Replace,
    /// Profile content is appended after the global content.
    #[default]
    Append,
}

/// Merge policy for every navigation axis of a profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPolicies {
    pub menus: AxisPolicy,
    pub actions: AxisPolicy,
    pub regions: AxisPolicy,
    pub footer: AxisPolicy,
}

/// Match predicate of a profile. Any non-empty list that matches activates
/// the profile; a predicate with every list empty never matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileMatchSpec {
    /// Glob patterns on the page route. A pattern ending in `/` also matches
    /// everything below it.
    pub paths: Vec<String>,
    pub collections: Vec<String>,
    pub layouts: Vec<String>,
    pub projects: Vec<String>,
}

impl ProfileMatchSpec {
    /// True when no match list is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
            && self.collections.is_empty()
            && self.layouts.is_empty()
            && self.projects.is_empty()
    }
}

/// Override bundle activated by a render context.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationProfileSpec {
    pub name: String,
    #[serde(rename = "match")]
    pub matches: ProfileMatchSpec,
    /// Higher wins. Ties go to the profile declared first.
    pub priority: i32,
    pub merge: AxisPolicies,
    /// Axis content. `None` leaves the global content untouched.
    pub menus: Option<Vec<MenuSpec>>,
    pub actions: Option<Vec<MenuItemSpec>>,
    pub regions: Option<Vec<NavigationRegionSpec>>,
    pub footer: Option<NavigationFooterSpec>,
}

/// Default render context of a surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContextSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Named rendering surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSurfaceSpec {
    pub name: String,
    pub context: RenderContextSpec,
    pub primary_menu: String,
    pub sidebar_menu: Option<String>,
    pub products_menu: Option<String>,
}

impl Default for NavigationSurfaceSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            context: RenderContextSpec::default(),
            primary_menu: "main".to_owned(),
            sidebar_menu: None,
            products_menu: None,
        }
    }
}
