//! Rendering surfaces: explicit declarations plus inferred defaults.
//!
//! Inference is an ordered list of [`SurfaceRule`]s. Each rule pairs a
//! predicate over [`SurfaceInputs`] with a factory for the surface it adds.
//! Explicit surfaces always come first and shadow inferred ones by name.

use rw_config::{NavigationSurfaceSpec, RenderContextSpec};

/// Site facts consulted by surface inference.
#[derive(Clone, Debug, Default)]
pub struct SurfaceInputs {
    /// Declared and used collection names.
    pub collections: Vec<String>,
    /// Language- and version-free routes of every published item.
    pub routes: Vec<String>,
    /// Enabled feature flags.
    pub features: Vec<String>,
}

impl SurfaceInputs {
    #[must_use]
    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Whether any route lives under `prefix` (a directory route such as `/docs/`).
    #[must_use]
    pub fn has_route_under(&self, prefix: &str) -> bool {
        let bare = prefix.trim_end_matches('/');
        self.routes
            .iter()
            .any(|r| r.starts_with(prefix) || r == bare)
    }

    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.eq_ignore_ascii_case(name))
    }
}

/// Inference rule for one implicit surface.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceRule {
    pub name: &'static str,
    pub applies: fn(&SurfaceInputs) -> bool,
    pub build: fn() -> NavigationSurfaceSpec,
}

/// Surface after explicit/inferred resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSurface {
    pub spec: NavigationSurfaceSpec,
    pub inferred: bool,
}

/// Feature flag that enables the API reference surface.
pub const API_DOCS_FEATURE: &str = "api-docs";

/// Built-in inference rules, in output order.
pub const DEFAULT_SURFACE_RULES: &[SurfaceRule] = &[
    SurfaceRule {
        name: "main",
        applies: always,
        build: main_surface,
    },
    SurfaceRule {
        name: "docs",
        applies: has_docs,
        build: docs_surface,
    },
    SurfaceRule {
        name: "apidocs",
        applies: has_api_docs,
        build: api_docs_surface,
    },
];

fn always(_: &SurfaceInputs) -> bool {
    true
}

fn has_docs(inputs: &SurfaceInputs) -> bool {
    inputs.has_collection("docs") || inputs.has_route_under("/docs/")
}

fn has_api_docs(inputs: &SurfaceInputs) -> bool {
    inputs.has_route_under("/api/") || inputs.has_feature(API_DOCS_FEATURE)
}

fn main_surface() -> NavigationSurfaceSpec {
    NavigationSurfaceSpec {
        name: "main".to_owned(),
        context: RenderContextSpec {
            path: Some("/".to_owned()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn docs_surface() -> NavigationSurfaceSpec {
    NavigationSurfaceSpec {
        name: "docs".to_owned(),
        context: RenderContextSpec {
            path: Some("/docs/".to_owned()),
            collection: Some("docs".to_owned()),
            ..Default::default()
        },
        sidebar_menu: Some("docs".to_owned()),
        ..Default::default()
    }
}

fn api_docs_surface() -> NavigationSurfaceSpec {
    NavigationSurfaceSpec {
        name: "apidocs".to_owned(),
        context: RenderContextSpec {
            path: Some("/api/".to_owned()),
            collection: Some("api".to_owned()),
            layout: Some("api".to_owned()),
            project: None,
        },
        sidebar_menu: Some("api".to_owned()),
        ..Default::default()
    }
}

/// Explicit surfaces, then every applicable rule not shadowed by name.
#[must_use]
pub fn resolve_surfaces(
    explicit: &[NavigationSurfaceSpec],
    rules: &[SurfaceRule],
    inputs: &SurfaceInputs,
) -> Vec<ResolvedSurface> {
    let mut surfaces: Vec<ResolvedSurface> = Vec::with_capacity(explicit.len() + rules.len());
    for spec in explicit {
        if surfaces.iter().any(|s| s.spec.name.eq_ignore_ascii_case(&spec.name)) {
            tracing::debug!(surface = %spec.name, "Skipping duplicate surface declaration");
            continue;
        }
        surfaces.push(ResolvedSurface {
            spec: spec.clone(),
            inferred: false,
        });
    }
    for rule in rules {
        if surfaces.iter().any(|s| s.spec.name.eq_ignore_ascii_case(rule.name)) {
            continue;
        }
        if (rule.applies)(inputs) {
            tracing::debug!(surface = rule.name, "Inferred surface");
            surfaces.push(ResolvedSurface {
                spec: (rule.build)(),
                inferred: true,
            });
        }
    }
    surfaces
}
