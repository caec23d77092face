//! Per-build lookup state.

use rw_config::{CollectionSpec, NavigationSpec, SiteSpec, TaxonomySpec, TrailingSlash};
use rw_routing::{Localization, RouteBuilder, Versioning, normalize_token};

/// Collection names and path segments that mark an editorial collection.
const EDITORIAL_NAMES: [&str; 2] = ["blog", "news"];

/// Normalized site settings shared by every stage of one build.
///
/// Created fresh by each [`build_site`](crate::build_site) call and never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct BuildContext {
    pub localization: Localization,
    pub versioning: Versioning,
    pub collections: Vec<CollectionSpec>,
    pub taxonomies: Vec<TaxonomySpec>,
    pub navigation: NavigationSpec,
    pub features: Vec<String>,
    pub trailing_slash: TrailingSlash,
    pub include_drafts: bool,
}

impl BuildContext {
    /// Normalize a site specification.
    #[must_use]
    pub fn new(spec: &SiteSpec) -> Self {
        let trailing_slash = spec.build.trailing_slash;
        Self {
            localization: Localization::new(&spec.i18n, trailing_slash),
            versioning: Versioning::new(&spec.versions, trailing_slash),
            collections: spec.collections.clone(),
            taxonomies: spec.taxonomies.clone(),
            navigation: spec.navigation.clone(),
            features: spec.build.features.clone(),
            trailing_slash,
            include_drafts: spec.build.drafts,
        }
    }

    #[must_use]
    pub fn route_builder(&self) -> RouteBuilder<'_> {
        RouteBuilder::new(
            &self.localization,
            &self.versioning,
            &self.collections,
            &self.taxonomies,
            self.trailing_slash,
        )
    }

    /// Whether a collection is editorial: named, or based, under blog/news.
    #[must_use]
    pub fn is_editorial(&self, collection: &str) -> bool {
        let spec = self.route_builder().collection(collection);
        let name = normalize_token(&spec.name);
        if EDITORIAL_NAMES.contains(&name.as_str()) {
            return true;
        }
        spec.output_base()
            .split('/')
            .chain(spec.source_root().split('/'))
            .any(|segment| EDITORIAL_NAMES.contains(&normalize_token(segment).as_str()))
    }
}
