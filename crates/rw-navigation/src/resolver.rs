//! Navigation resolution: profile merge per context, then per surface.

use rw_config::{NavigationSpec, RenderContextSpec};

use crate::merge::merge_axis;
use crate::model::{NavigationModel, ResolvedNavigation, SurfaceNavigation};
use crate::profile::select_profile;
use crate::surface::{ResolvedSurface, SurfaceInputs, SurfaceRule, resolve_surfaces};

/// Menus whose name starts with this prefix are visible on every surface.
const FOOTER_MENU_PREFIX: &str = "footer";

/// Resolves navigation for render contexts and surfaces.
#[derive(Clone, Copy, Debug)]
pub struct NavigationResolver<'a> {
    spec: &'a NavigationSpec,
    rules: &'a [SurfaceRule],
}

impl<'a> NavigationResolver<'a> {
    #[must_use]
    pub fn new(spec: &'a NavigationSpec, rules: &'a [SurfaceRule]) -> Self {
        Self { spec, rules }
    }

    /// Merge global navigation with the profile active for `context`.
    ///
    /// Ambiguous profile ties are reported through `warnings`.
    pub fn resolve(&self, context: &RenderContextSpec, warnings: &mut Vec<String>) -> ResolvedNavigation {
        let selection = select_profile(&self.spec.profiles, context);
        let Some(profile) = selection.profile else {
            return ResolvedNavigation {
                profile: None,
                menus: self.spec.menus.clone(),
                actions: self.spec.actions.clone(),
                regions: self.spec.regions.clone(),
                footer: self.spec.footer.clone(),
            };
        };

        for other in &selection.tied {
            let warning = format!(
                "Navigation profiles '{}' and '{}' both match context {} with priority {}; using '{}'",
                profile.name,
                other.name,
                describe_context(context),
                profile.priority,
                profile.name,
            );
            tracing::debug!("{warning}");
            warnings.push(warning);
        }

        tracing::debug!(profile = %profile.name, "Applying navigation profile");
        let policy = profile.merge;
        ResolvedNavigation {
            profile: Some(profile.name.clone()),
            menus: merge_axis(&self.spec.menus, profile.menus.as_ref(), policy.menus),
            actions: merge_axis(&self.spec.actions, profile.actions.as_ref(), policy.actions),
            regions: merge_axis(&self.spec.regions, profile.regions.as_ref(), policy.regions),
            footer: merge_axis(&self.spec.footer, profile.footer.as_ref(), policy.footer),
        }
    }

    /// Build the navigation model for every explicit and inferred surface.
    pub fn build_model(&self, inputs: &SurfaceInputs, warnings: &mut Vec<String>) -> NavigationModel {
        let surfaces = resolve_surfaces(&self.spec.surfaces, self.rules, inputs);
        NavigationModel {
            surfaces: surfaces
                .into_iter()
                .map(|surface| self.surface(surface, warnings))
                .collect(),
        }
    }

    fn surface(&self, surface: ResolvedSurface, warnings: &mut Vec<String>) -> SurfaceNavigation {
        let ResolvedSurface { spec, inferred } = surface;
        let resolved = self.resolve(&spec.context, warnings);

        let named: Vec<&str> = std::iter::once(spec.primary_menu.as_str())
            .chain(spec.sidebar_menu.as_deref())
            .chain(spec.products_menu.as_deref())
            .collect();

        if !inferred {
            for name in &named {
                if resolved.menu(name).is_none() {
                    let warning = format!("Surface '{}' references missing menu '{name}'", spec.name);
                    tracing::debug!("{warning}");
                    warnings.push(warning);
                }
            }
        }

        let menus = resolved
            .menus
            .into_iter()
            .filter(|m| named.contains(&m.name.as_str()) || m.name.starts_with(FOOTER_MENU_PREFIX))
            .collect();

        SurfaceNavigation {
            name: spec.name,
            inferred,
            profile: resolved.profile,
            context: spec.context,
            primary_menu: spec.primary_menu,
            sidebar_menu: spec.sidebar_menu,
            products_menu: spec.products_menu,
            menus,
            actions: resolved.actions,
            regions: resolved.regions,
            footer: resolved.footer,
        }
    }
}

fn describe_context(context: &RenderContextSpec) -> String {
    let parts: Vec<String> = [
        ("path", &context.path),
        ("collection", &context.collection),
        ("layout", &context.layout),
        ("project", &context.project),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}")))
    .collect();
    if parts.is_empty() {
        "(empty)".to_owned()
    } else {
        format!("({})", parts.join(", "))
    }
}
