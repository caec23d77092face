//! The full routing pass.

use std::collections::BTreeSet;

use rw_config::{RenderContextSpec, SiteSpec};
use rw_navigation::{
    DEFAULT_SURFACE_RULES, NavigationModel, NavigationResolver, ResolvedNavigation, SurfaceInputs,
};
use rw_routing::{
    ContentItem, LocalizationRuntime, ResolvedRouteTable, RouteOrigin, TaxonomyAggregator,
    TaxonomyIndex, TranslationIndex, VersionRuntime,
};

use crate::context::BuildContext;
use crate::verify::SiteVerifier;

/// Result of one routing pass.
#[derive(Debug)]
pub struct SiteBuild {
    /// Items annotated with language, translation key, version and route.
    pub items: Vec<ContentItem>,
    pub routes: ResolvedRouteTable,
    pub taxonomies: TaxonomyIndex,
    pub navigation: NavigationModel,
    /// Findings in a fixed order: collisions, landing pages, taxonomies,
    /// translations, navigation.
    pub warnings: Vec<String>,
    pub context: BuildContext,
    translations: TranslationIndex,
}

impl SiteBuild {
    /// Language switcher entries for an item of this build.
    #[must_use]
    pub fn localization_runtime(&self, item: &ContentItem) -> LocalizationRuntime {
        self.context
            .localization
            .build_runtime(item, &self.translations)
    }

    /// Version switcher entries for an item of this build.
    #[must_use]
    pub fn version_runtime(&self, item: &ContentItem) -> VersionRuntime {
        self.context.route_builder().version_runtime(item)
    }

    /// Navigation merged for the page's own context.
    ///
    /// Profiles match the route without its language prefix, so one path
    /// profile covers every translation.
    #[must_use]
    pub fn navigation_for(&self, item: &ContentItem) -> ResolvedNavigation {
        let language = item.language.as_deref().unwrap_or_default();
        let context = RenderContextSpec {
            path: item.route.as_deref().map(|route| {
                self.context
                    .localization
                    .strip_language_prefix_of(route, language)
            }),
            collection: Some(item.collection.clone()).filter(|c| !c.is_empty()),
            layout: item.layout.clone(),
            project: item.project.clone(),
        };
        NavigationResolver::new(&self.context.navigation, DEFAULT_SURFACE_RULES)
            .resolve(&context, &mut Vec::new())
    }

    /// Item by source path.
    #[must_use]
    pub fn item(&self, source_path: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.source_path == source_path)
    }
}

/// Route every item, synthesize listings, resolve navigation and verify.
///
/// Pure: the same specification and items always give the same result.
#[must_use]
pub fn build_site(spec: &SiteSpec, mut items: Vec<ContentItem>) -> SiteBuild {
    let context = BuildContext::new(spec);
    let builder = context.route_builder();

    for item in &mut items {
        builder.assign(item);
    }

    let mut routes = ResolvedRouteTable::new();
    for item in items.iter().filter(|i| i.is_published(context.include_drafts)) {
        if let Some(route) = &item.route {
            routes.insert(
                route.clone(),
                RouteOrigin::Content {
                    source_path: item.source_path.clone(),
                },
            );
        }
    }
    for (route, origin) in builder.collection_index_routes() {
        routes.insert(route, origin);
    }

    let taxonomies = TaxonomyAggregator::new(&context.taxonomies, context.include_drafts)
        .aggregate(&items, &context.localization);
    for (route, origin) in builder.taxonomy_routes(&taxonomies) {
        routes.insert(route, origin);
    }

    let translations = TranslationIndex::new(&items);

    let mut warnings = SiteVerifier::new(&context).verify(&items, &routes, &taxonomies);

    let inputs = surface_inputs(&context, &items);
    let navigation = NavigationResolver::new(&context.navigation, DEFAULT_SURFACE_RULES)
        .build_model(&inputs, &mut warnings);

    tracing::info!(
        items = items.len(),
        routes = routes.len(),
        surfaces = navigation.surfaces.len(),
        warnings = warnings.len(),
        "Routing pass complete"
    );

    SiteBuild {
        items,
        routes,
        taxonomies,
        navigation,
        warnings,
        context,
        translations,
    }
}

fn surface_inputs(context: &BuildContext, items: &[ContentItem]) -> SurfaceInputs {
    let builder = context.route_builder();
    let published = || items.iter().filter(|i| i.is_published(context.include_drafts));

    let collections: BTreeSet<String> = context
        .collections
        .iter()
        .map(|c| c.name.clone())
        .chain(published().map(|i| i.collection.clone()))
        .filter(|c| !c.is_empty())
        .collect();

    SurfaceInputs {
        collections: collections.into_iter().collect(),
        routes: published()
            .filter_map(|i| {
                let route = i.route.as_deref()?;
                Some(builder.decompose(route, i.language.as_deref().unwrap_or_default()).base)
            })
            .collect(),
        features: context.features.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rw_config::{
        AxisPolicies, AxisPolicy, CollectionSpec, LanguageSpec, LocalizationConfig, MenuItemSpec,
        MenuSpec, NavigationProfileSpec, NavigationSpec, ProfileMatchSpec,
    };
    use serde_json::json;
    use static_assertions::assert_impl_all;

    assert_impl_all!(SiteBuild: Send, Sync);
    assert_impl_all!(BuildContext: Send, Sync);

    fn en_fr() -> LocalizationConfig {
        LocalizationConfig {
            default_language: Some("en".to_owned()),
            languages: vec![
                LanguageSpec {
                    code: "en".to_owned(),
                    ..Default::default()
                },
                LanguageSpec {
                    code: "fr".to_owned(),
                    prefix: Some("fr".to_owned()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn pages_collection() -> CollectionSpec {
        CollectionSpec {
            name: "pages".to_owned(),
            base_path: Some("/".to_owned()),
            source_dir: Some(String::new()),
            ..Default::default()
        }
    }

    fn keyed(source: &str, collection: &str, key: &str) -> ContentItem {
        ContentItem {
            translation_key: Some(key.to_owned()),
            ..ContentItem::new(source, collection)
        }
    }

    #[test]
    fn test_scenario_a_french_alternate() {
        let spec = SiteSpec {
            i18n: en_fr(),
            collections: vec![pages_collection()],
            ..Default::default()
        };
        let items = vec![
            keyed("index.md", "pages", "home"),
            keyed("fr/accueil.md", "pages", "home"),
        ];
        let build = build_site(&spec, items);

        let home = build.item("index.md").unwrap();
        assert_eq!(home.route.as_deref(), Some("/"));
        assert_eq!(build.item("fr/accueil.md").unwrap().route.as_deref(), Some("/fr/accueil/"));

        let runtime = build.localization_runtime(home);
        let french = runtime.alternates.iter().find(|a| a.code == "fr").unwrap();
        assert_eq!(french.url, "/fr/accueil/");
        assert!(!french.current);
        assert!(build.warnings.is_empty(), "{:?}", build.warnings);
    }

    #[test]
    fn test_scenario_b_docs_index_collision() {
        let spec = SiteSpec {
            collections: vec![CollectionSpec {
                name: "docs".to_owned(),
                index: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let build = build_site(&spec, vec![ContentItem::new("docs/index.md", "docs")]);

        assert_eq!(build.warnings.len(), 1, "{:?}", build.warnings);
        assert!(build.warnings[0].contains("'/docs/'"));
        assert_eq!(build.routes.collisions().len(), 1);
        assert_eq!(
            build.routes.get("/docs/"),
            Some(&RouteOrigin::Content {
                source_path: "docs/index.md".to_owned()
            })
        );
    }

    #[test]
    fn test_scenario_c_undeclared_tags() {
        let mut post = ContentItem::new("notes/first.md", "notes");
        post.tags = vec!["rust".to_owned()];
        let build = build_site(&SiteSpec::default(), vec![post]);

        assert_eq!(
            build.warnings,
            vec![
                "Taxonomy 'tags' is used by content but not declared in the site configuration; \
                 routes use the implicit base path '/tags/'"
                    .to_owned()
            ]
        );
        assert!(build.routes.contains("/tags/"));
        assert!(build.routes.contains("/tags/rust/"));
    }

    #[test]
    fn test_scenario_d_profile_priority() {
        let menu = |label: &str| MenuSpec {
            name: "main".to_owned(),
            items: vec![MenuItemSpec {
                label: label.to_owned(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let spec = SiteSpec {
            collections: vec![CollectionSpec {
                name: "docs".to_owned(),
                ..Default::default()
            }],
            navigation: NavigationSpec {
                menus: vec![menu("Home")],
                profiles: vec![
                    NavigationProfileSpec {
                        name: "P1".to_owned(),
                        priority: 10,
                        matches: ProfileMatchSpec {
                            collections: vec!["docs".to_owned()],
                            ..Default::default()
                        },
                        merge: AxisPolicies {
                            menus: AxisPolicy::Replace,
                            ..Default::default()
                        },
                        menus: Some(vec![menu("Docs")]),
                        ..Default::default()
                    },
                    NavigationProfileSpec {
                        name: "P2".to_owned(),
                        priority: 5,
                        matches: ProfileMatchSpec {
                            paths: vec!["/docs/advanced/".to_owned()],
                            ..Default::default()
                        },
                        menus: Some(vec![menu("Advanced")]),
                        actions: Some(vec![MenuItemSpec {
                            label: "Only P2".to_owned(),
                            ..Default::default()
                        }]),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let build = build_site(&spec, vec![ContentItem::new("docs/advanced/tuning.md", "docs")]);
        let page = build.item("docs/advanced/tuning.md").unwrap();
        assert_eq!(page.route.as_deref(), Some("/docs/advanced/tuning/"));

        let navigation = build.navigation_for(page);
        assert_eq!(navigation.profile.as_deref(), Some("P1"));
        assert_eq!(navigation.menus, vec![menu("Docs")]);
        assert!(navigation.actions.is_empty());

        let docs = build.navigation.surface("docs").unwrap();
        assert_eq!(docs.profile.as_deref(), Some("P1"));
    }

    #[test]
    fn test_path_profile_matches_translated_page() {
        let spec = SiteSpec {
            i18n: en_fr(),
            collections: vec![CollectionSpec {
                name: "docs".to_owned(),
                ..Default::default()
            }],
            navigation: NavigationSpec {
                profiles: vec![NavigationProfileSpec {
                    name: "advanced".to_owned(),
                    matches: ProfileMatchSpec {
                        paths: vec!["/docs/advanced/".to_owned()],
                        ..Default::default()
                    },
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let build = build_site(&spec, vec![ContentItem::new("fr/docs/advanced/tuning.md", "docs")]);
        let page = build.item("fr/docs/advanced/tuning.md").unwrap();
        assert_eq!(page.route.as_deref(), Some("/fr/docs/advanced/tuning/"));

        assert_eq!(build.navigation_for(page).profile.as_deref(), Some("advanced"));
    }

    #[test]
    fn test_root_page_named_like_language_prefix() {
        let spec = SiteSpec {
            i18n: en_fr(),
            collections: vec![pages_collection()],
            ..Default::default()
        };
        let build = build_site(
            &spec,
            vec![ContentItem::new("index.md", "pages"), ContentItem::new("fr.md", "pages")],
        );

        let fr = build.item("fr.md").unwrap();
        assert_eq!(fr.language.as_deref(), Some("en"));
        assert_eq!(fr.route.as_deref(), Some("/fr/"));
        assert_eq!(build.item("index.md").unwrap().route.as_deref(), Some("/"));
        assert!(build.routes.collisions().is_empty());
        assert!(build.warnings.is_empty(), "{:?}", build.warnings);
    }

    #[test]
    fn test_scenario_e_blog_without_landing() {
        let spec = SiteSpec {
            i18n: en_fr(),
            ..Default::default()
        };
        let items = ["blog/one.md", "blog/two.md", "blog/three.md"]
            .into_iter()
            .map(|p| ContentItem::new(p, "blog"))
            .collect();
        let build = build_site(&spec, items);
        assert_eq!(
            build.warnings,
            vec![
                "Collection 'blog' has no landing page at '/blog/' for language 'en'".to_owned(),
                "Collection 'blog' has no landing page at '/fr/blog/' for language 'fr'".to_owned(),
            ]
        );
    }

    #[test]
    fn test_blog_index_collection_satisfies_landing() {
        let spec = SiteSpec {
            i18n: en_fr(),
            collections: vec![CollectionSpec {
                name: "blog".to_owned(),
                index: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let build = build_site(&spec, vec![ContentItem::new("blog/one.md", "blog")]);
        assert!(build.warnings.is_empty(), "{:?}", build.warnings);
        assert!(build.routes.contains("/fr/blog/"));
    }

    #[test]
    fn test_drafts_routed_but_excluded() {
        let mut draft = ContentItem::new("notes/wip.md", "notes");
        draft.draft = true;
        draft.tags = vec!["secret".to_owned()];
        let build = build_site(&SiteSpec::default(), vec![draft.clone()]);
        assert_eq!(build.items[0].route.as_deref(), Some("/notes/wip/"));
        assert!(build.routes.is_empty());

        let mut spec = SiteSpec::default();
        spec.build.drafts = true;
        let build = build_site(&spec, vec![draft]);
        assert!(build.routes.contains("/notes/wip/"));
        assert!(build.routes.contains("/tags/secret/"));
    }

    #[test]
    fn test_uniqueness_every_content_collision_reported() {
        let items = vec![
            ContentItem::new("notes/a.md", "notes"),
            ContentItem {
                canonical_url: Some("/notes/a/".to_owned()),
                ..ContentItem::new("notes/b.md", "notes")
            },
            ContentItem {
                metadata: [("slug".to_owned(), json!("a"))].into_iter().collect(),
                ..ContentItem::new("notes/c.md", "notes")
            },
        ];
        let build = build_site(&SiteSpec::default(), items);
        assert_eq!(build.routes.len(), 1);
        assert_eq!(build.routes.collisions().len(), 2);
        assert_eq!(
            build
                .warnings
                .iter()
                .filter(|w| w.starts_with("Route collision at '/notes/a/'"))
                .count(),
            2
        );
    }

    #[test]
    fn test_round_trip_through_builder() {
        let spec = SiteSpec {
            i18n: en_fr(),
            ..Default::default()
        };
        let build = build_site(&spec, vec![ContentItem::new("fr/guides/intro.md", "guides")]);
        let route = build.items[0].route.clone().unwrap();
        assert_eq!(route, "/fr/guides/intro/");
        assert_eq!(build.context.route_builder().decompose(&route, "fr").base, "/guides/intro/");
    }

    #[test]
    fn test_determinism() {
        let spec = SiteSpec {
            i18n: en_fr(),
            collections: vec![pages_collection()],
            ..Default::default()
        };
        let items = || {
            vec![
                keyed("index.md", "pages", "home"),
                keyed("fr/accueil.md", "pages", "home"),
                ContentItem {
                    tags: vec!["b".to_owned(), "A".to_owned()],
                    ..ContentItem::new("blog/post.md", "blog")
                },
                ContentItem::new("docs/intro.md", "docs"),
            ]
        };
        let first = build_site(&spec, items());
        let second = build_site(&spec, items());
        assert_eq!(first.warnings, second.warnings);
        assert_eq!(
            serde_json::to_string(&first.navigation).unwrap(),
            serde_json::to_string(&second.navigation).unwrap()
        );
        assert_eq!(first.routes, second.routes);
        assert_eq!(first.items, second.items);
    }
}
