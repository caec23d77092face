//! Route assembly.
//!
//! A route is composed from three layers, innermost first:
//!
//! 1. the base route: collection base path + slug,
//! 2. the version mount (versioned collections only),
//! 3. the language prefix.
//!
//! So a French page of version `v2` in the `docs` collection lives at
//! `/fr/docs/v2/guide/`. Given the page's language,
//! [`RouteBuilder::decompose`] strips the layers in reverse order and always
//! gives back the base route.

use std::borrow::Cow;

use rw_config::{CollectionSpec, TaxonomySpec, TrailingSlash};

use crate::content::{ContentItem, PageKind};
use crate::i18n::Localization;
use crate::path::{build_route, normalize_route, segments, slugify};
use crate::table::RouteOrigin;
use crate::taxonomy::{TaxonomyIndex, implicit_base_path};
use crate::version::{VersionRuntime, Versioning};

/// File stems that denote a directory landing page.
const INDEX_STEMS: [&str; 2] = ["index", "_index"];

/// Route split into its layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteParts {
    pub language: String,
    pub version: Option<String>,
    pub base: String,
}

/// Assembles routes from collections, localization and versioning.
#[derive(Clone, Copy, Debug)]
pub struct RouteBuilder<'a> {
    localization: &'a Localization,
    versioning: &'a Versioning,
    collections: &'a [CollectionSpec],
    taxonomies: &'a [TaxonomySpec],
    trailing_slash: TrailingSlash,
}

impl<'a> RouteBuilder<'a> {
    #[must_use]
    pub fn new(
        localization: &'a Localization,
        versioning: &'a Versioning,
        collections: &'a [CollectionSpec],
        taxonomies: &'a [TaxonomySpec],
        trailing_slash: TrailingSlash,
    ) -> Self {
        Self {
            localization,
            versioning,
            collections,
            taxonomies,
            trailing_slash,
        }
    }

    /// Collection by name; undeclared collections get `/{name}` defaults.
    #[must_use]
    pub fn collection(&self, name: &str) -> Cow<'a, CollectionSpec> {
        if let Some(spec) = self.collections.iter().find(|c| c.name == name) {
            return Cow::Borrowed(spec);
        }
        let root = name.trim().is_empty();
        Cow::Owned(CollectionSpec {
            name: name.to_owned(),
            base_path: root.then(|| "/".to_owned()),
            source_dir: root.then(String::new),
            ..Default::default()
        })
    }

    /// Join a base path and slug under the site's trailing-slash policy.
    #[must_use]
    pub fn build_route(&self, base_path: &str, slug: &str) -> String {
        build_route(base_path, slug, self.trailing_slash)
    }

    /// Mount a base route under a version, then a language.
    #[must_use]
    pub fn compose(&self, base: &str, version: Option<&str>, language: &str) -> String {
        let versioned = match version {
            Some(name) => Cow::Owned(self.versioning.apply_version_prefix(base, name)),
            None => Cow::Borrowed(base),
        };
        self.localization.apply_language_prefix(&versioned, language)
    }

    /// Split the route of a page in `language` into its layers.
    #[must_use]
    pub fn decompose(&self, route: &str, language: &str) -> RouteParts {
        let language = self
            .localization
            .resolve_effective_language_code(language)
            .to_owned();
        let unprefixed = self.localization.strip_language_prefix_of(route, &language);
        RouteParts {
            language,
            version: self
                .versioning
                .version_of_route(&unprefixed)
                .filter(|v| segments(&v.url).next().is_some())
                .map(|v| v.name.clone()),
            base: self.versioning.strip_version_prefix(&unprefixed),
        }
    }

    /// Assign language, version, translation key, kind and route to an item.
    pub fn assign(&self, item: &mut ContentItem) {
        let collection = self.collection(&item.collection);
        let resolved = self
            .localization
            .resolve_item_language(item.language.as_deref(), &item.source_path);
        let language = resolved.language.code.clone();

        let mut parts: Vec<&str> = segments(&resolved.relative_path).collect();
        let root: Vec<&str> = segments(collection.source_root()).collect();
        if !root.is_empty()
            && parts.len() > root.len()
            && parts.iter().zip(&root).all(|(a, b)| a.eq_ignore_ascii_case(b))
        {
            parts.drain(..root.len());
        }
        if let Some(last) = parts.last_mut() {
            *last = strip_extension(*last);
        }
        let mut kind = PageKind::Page;
        if parts.last().is_some_and(|l| INDEX_STEMS.contains(l)) {
            parts.pop();
            kind = PageKind::Index;
        }
        if let Some(slug) = item.meta_str("slug") {
            parts.pop();
            parts.extend(segments(slug));
        }

        let version = if collection.versioned && self.versioning.is_enabled() {
            let declared = item.meta_str("version").or(item.version.as_deref());
            let (version, consumed) = self.versioning.resolve_item_version(declared, &parts);
            if consumed {
                parts.remove(0);
            }
            version.map(|v| v.name.clone())
        } else {
            None
        };

        let mut slug = parts.join("/");
        let key = match &version {
            Some(v) => format!("{}@{v}:{slug}", collection.name),
            None => format!("{}:{slug}", collection.name),
        };
        if kind == PageKind::Index && !slug.is_empty() {
            slug.push('/');
        }

        let route = match item.canonical_url.as_deref().map(str::trim) {
            Some(canonical) if canonical.starts_with('/') => normalize_route(canonical, self.trailing_slash),
            _ => self.compose(
                &self.build_route(&collection.output_base(), &slug),
                version.as_deref(),
                &language,
            ),
        };

        tracing::debug!(
            source = %item.source_path,
            %route,
            %language,
            version = version.as_deref(),
            "Assigned route"
        );

        if item.translation_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            item.translation_key = Some(
                item.meta_str("translation_key")
                    .map_or(key, str::to_owned),
            );
        }
        item.language = Some(language);
        item.version = version;
        item.kind = kind;
        item.route = Some(route);
    }

    /// Landing route of a collection in a language.
    #[must_use]
    pub fn landing_route(&self, collection: &str, language: &str) -> String {
        let spec = self.collection(collection);
        let version = if spec.versioned {
            self.versioning.fallback_version().map(|v| v.name.as_str())
        } else {
            None
        };
        self.compose(&self.build_route(&spec.output_base(), ""), version, language)
    }

    /// Synthetic index routes of collections flagged `index`.
    #[must_use]
    pub fn collection_index_routes(&self) -> Vec<(String, RouteOrigin)> {
        let mut routes = Vec::new();
        for collection in self.collections.iter().filter(|c| c.index) {
            let base = self.build_route(&collection.output_base(), "");
            let versions: Vec<Option<&str>> = if collection.versioned && self.versioning.is_enabled() {
                self.versioning
                    .versions()
                    .iter()
                    .map(|v| Some(v.name.as_str()))
                    .collect()
            } else {
                vec![None]
            };
            for language in self.localization.languages() {
                for version in &versions {
                    routes.push((
                        self.compose(&base, *version, &language.code),
                        RouteOrigin::CollectionIndex {
                            collection: collection.name.clone(),
                            language: language.code.clone(),
                            version: version.map(str::to_owned),
                        },
                    ));
                }
            }
        }
        routes
    }

    /// Listing base paths of every taxonomy that gets routes.
    ///
    /// Declared taxonomies need a base path. Built-ins used without a
    /// declaration get their implicit base path.
    #[must_use]
    pub fn taxonomy_bases(&self, index: &TaxonomyIndex) -> Vec<(String, String)> {
        let mut bases: Vec<(String, String)> = self
            .taxonomies
            .iter()
            .filter_map(|t| t.base_path.as_ref().map(|b| (t.name.clone(), b.clone())))
            .collect();
        for used in index.used() {
            if self.taxonomies.iter().any(|t| t.name.eq_ignore_ascii_case(used)) {
                continue;
            }
            if let Some(base) = implicit_base_path(used) {
                bases.push((used.to_owned(), base.to_owned()));
            }
        }
        bases
    }

    /// Synthetic listing and term routes for every language.
    #[must_use]
    pub fn taxonomy_routes(&self, index: &TaxonomyIndex) -> Vec<(String, RouteOrigin)> {
        let mut routes = Vec::new();
        for (taxonomy, base) in self.taxonomy_bases(index) {
            for language in self.localization.languages() {
                let code = language.code.as_str();
                routes.push((
                    self.compose(&self.build_route(&base, ""), None, code),
                    RouteOrigin::TaxonomyListing {
                        taxonomy: taxonomy.clone(),
                        language: code.to_owned(),
                    },
                ));
                for term in index.terms(&taxonomy, code) {
                    let slug = slugify(&term.name);
                    if slug.is_empty() {
                        tracing::debug!(%taxonomy, term = %term.name, "Skipping term with empty slug");
                        continue;
                    }
                    routes.push((
                        self.compose(&self.build_route(&base, &slug), None, code),
                        RouteOrigin::TaxonomyTerm {
                            taxonomy: taxonomy.clone(),
                            language: code.to_owned(),
                            term: term.name.to_lowercase(),
                        },
                    ));
                }
            }
        }
        routes
    }

    /// Version switcher data for a routed item.
    #[must_use]
    pub fn version_runtime(&self, item: &ContentItem) -> VersionRuntime {
        let Some(route) = item.route.as_deref() else {
            return VersionRuntime::default();
        };
        if !self.collection(&item.collection).versioned && item.version.is_none() {
            return VersionRuntime::default();
        }
        let language = self
            .localization
            .resolve_effective_language_code(item.language.as_deref().unwrap_or_default());
        let unprefixed = self.localization.strip_language_prefix_of(route, language);
        let current = self.versioning.configured_current().or_else(|| {
            item.version
                .as_deref()
                .and_then(|name| self.versioning.version(name))
                .or_else(|| self.versioning.resolve_current_version(&unprefixed))
        });
        let mut runtime = self
            .versioning
            .build_runtime(&self.versioning.strip_version_prefix(&unprefixed), current);
        for entry in &mut runtime.entries {
            entry.url = self.localization.apply_language_prefix(&entry.url, language);
        }
        runtime
    }
}

/// Drop the file extension of a segment, keeping dotfiles intact.
fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ResolvedRouteTable;
    use crate::taxonomy::{TAGS, TaxonomyAggregator};
    use pretty_assertions::assert_eq;
    use rw_config::{LanguageSpec, LocalizationConfig, VersionSpec, VersioningConfig};
    use serde_json::json;

    struct Fixture {
        localization: Localization,
        versioning: Versioning,
        collections: Vec<CollectionSpec>,
        taxonomies: Vec<TaxonomySpec>,
    }

    impl Fixture {
        fn new() -> Self {
            let i18n = LocalizationConfig {
                languages: vec![
                    LanguageSpec {
                        code: "en".to_owned(),
                        ..Default::default()
                    },
                    LanguageSpec {
                        code: "fr".to_owned(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            };
            let versions = VersioningConfig {
                base_path: "/docs".to_owned(),
                list: vec![
                    VersionSpec {
                        name: "v2".to_owned(),
                        latest: true,
                        ..Default::default()
                    },
                    VersionSpec {
                        name: "v1".to_owned(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            };
            Self {
                localization: Localization::new(&i18n, TrailingSlash::Always),
                versioning: Versioning::new(&versions, TrailingSlash::Always),
                collections: vec![
                    CollectionSpec {
                        name: "pages".to_owned(),
                        base_path: Some("/".to_owned()),
                        source_dir: Some(String::new()),
                        ..Default::default()
                    },
                    CollectionSpec {
                        name: "blog".to_owned(),
                        index: true,
                        ..Default::default()
                    },
                    CollectionSpec {
                        name: "docs".to_owned(),
                        versioned: true,
                        ..Default::default()
                    },
                ],
                taxonomies: vec![TaxonomySpec {
                    name: "series".to_owned(),
                    base_path: Some("/series".to_owned()),
                    label: None,
                }],
            }
        }

        fn builder(&self) -> RouteBuilder<'_> {
            RouteBuilder::new(
                &self.localization,
                &self.versioning,
                &self.collections,
                &self.taxonomies,
                TrailingSlash::Always,
            )
        }
    }

    fn assigned(fixture: &Fixture, source: &str, collection: &str) -> ContentItem {
        let mut item = ContentItem::new(source, collection);
        fixture.builder().assign(&mut item);
        item
    }

    #[test]
    fn test_assign_plain_page() {
        let fixture = Fixture::new();
        let item = assigned(&fixture, "blog/hello-world.md", "blog");
        assert_eq!(item.route.as_deref(), Some("/blog/hello-world/"));
        assert_eq!(item.language.as_deref(), Some("en"));
        assert_eq!(item.translation_key.as_deref(), Some("blog:hello-world"));
        assert_eq!(item.kind, PageKind::Page);
    }

    #[test]
    fn test_assign_path_language() {
        let fixture = Fixture::new();
        let item = assigned(&fixture, "fr/blog/bonjour.md", "blog");
        assert_eq!(item.route.as_deref(), Some("/fr/blog/bonjour/"));
        assert_eq!(item.language.as_deref(), Some("fr"));
        assert_eq!(item.translation_key.as_deref(), Some("blog:bonjour"));
    }

    #[test]
    fn test_assign_index_pages() {
        let fixture = Fixture::new();
        let home = assigned(&fixture, "index.md", "pages");
        assert_eq!(home.route.as_deref(), Some("/"));
        assert_eq!(home.kind, PageKind::Index);

        let section = assigned(&fixture, r"blog\archive\_index.md", "blog");
        assert_eq!(section.route.as_deref(), Some("/blog/archive/"));
        assert_eq!(section.kind, PageKind::Index);
    }

    #[test]
    fn test_assign_front_matter_overrides() {
        let fixture = Fixture::new();
        let mut item = ContentItem::new("fr/blog/post.md", "blog");
        item.language = Some("EN".to_owned());
        item.metadata.insert("slug".to_owned(), json!("custom-slug"));
        item.translation_key = Some("post".to_owned());
        fixture.builder().assign(&mut item);
        assert_eq!(item.route.as_deref(), Some("/blog/custom-slug/"));
        assert_eq!(item.language.as_deref(), Some("en"));
        assert_eq!(item.translation_key.as_deref(), Some("post"));
    }

    #[test]
    fn test_assign_canonical_path() {
        let fixture = Fixture::new();
        let mut item = ContentItem::new("fr/blog/post.md", "blog");
        item.canonical_url = Some("//custom//place".to_owned());
        fixture.builder().assign(&mut item);
        assert_eq!(item.route.as_deref(), Some("/custom/place/"));

        let mut item = ContentItem::new("blog/post.md", "blog");
        item.canonical_url = Some("https://example.com/post/".to_owned());
        fixture.builder().assign(&mut item);
        assert_eq!(item.route.as_deref(), Some("/blog/post/"));
    }

    #[test]
    fn test_assign_versioned() {
        let fixture = Fixture::new();
        let item = assigned(&fixture, "fr/docs/v1/guide.md", "docs");
        assert_eq!(item.route.as_deref(), Some("/fr/docs/v1/guide/"));
        assert_eq!(item.version.as_deref(), Some("v1"));
        assert_eq!(item.translation_key.as_deref(), Some("docs@v1:guide"));

        let item = assigned(&fixture, "docs/guide.md", "docs");
        assert_eq!(item.route.as_deref(), Some("/docs/v2/guide/"));
        assert_eq!(item.version.as_deref(), Some("v2"));
    }

    #[test]
    fn test_assign_undeclared_collection() {
        let fixture = Fixture::new();
        let item = assigned(&fixture, "notes/a.md", "notes");
        assert_eq!(item.route.as_deref(), Some("/notes/a/"));
        let item = assigned(&fixture, "about.md", "");
        assert_eq!(item.route.as_deref(), Some("/about/"));
    }

    #[test]
    fn test_assign_is_pure() {
        let fixture = Fixture::new();
        let first = assigned(&fixture, "fr/docs/v1/guide.md", "docs");
        let second = assigned(&fixture, "fr/docs/v1/guide.md", "docs");
        assert_eq!(first, second);
    }

    #[test]
    fn test_decompose_round_trip() {
        let fixture = Fixture::new();
        let builder = fixture.builder();
        for base in ["/docs/", "/docs/guide/intro/", "/blog/post/", "/", "/fr/guide/"] {
            for version in [None, Some("v1"), Some("v2")] {
                for language in ["en", "fr"] {
                    let route = builder.compose(base, version, language);
                    let parts = builder.decompose(&route, language);
                    assert_eq!(parts.base, base, "route={route}");
                    assert_eq!(parts.language, language, "route={route}");
                }
            }
        }
        let parts = builder.decompose("/fr/docs/v1/guide/", "fr");
        assert_eq!(parts.version.as_deref(), Some("v1"));
    }

    #[test]
    fn test_compose_keeps_prefix_like_base_segments() {
        let fixture = Fixture::new();
        let builder = fixture.builder();
        assert_eq!(builder.compose("/fr/guide/", None, "en"), "/fr/guide/");
        assert_eq!(builder.compose("/fr/guide/", None, "fr"), "/fr/fr/guide/");
        assert_eq!(builder.decompose("/fr/guide/", "en").base, "/fr/guide/");
        assert_eq!(builder.decompose("/fr/fr/guide/", "fr").base, "/fr/guide/");
    }

    #[test]
    fn test_collection_index_routes() {
        let fixture = Fixture::new();
        let routes: Vec<String> = fixture
            .builder()
            .collection_index_routes()
            .into_iter()
            .map(|(r, _)| r)
            .collect();
        assert_eq!(routes, vec!["/blog/", "/fr/blog/"]);
    }

    #[test]
    fn test_landing_route() {
        let fixture = Fixture::new();
        let builder = fixture.builder();
        assert_eq!(builder.landing_route("blog", "fr"), "/fr/blog/");
        assert_eq!(builder.landing_route("docs", "en"), "/docs/v2/");
    }

    #[test]
    fn test_taxonomy_routes() {
        let fixture = Fixture::new();
        let mut post = ContentItem::new("blog/post.md", "blog");
        post.tags = vec!["Rust".to_owned(), "C++".to_owned(), "!!".to_owned()];
        post.metadata.insert("series".to_owned(), json!("Intro"));
        fixture.builder().assign(&mut post);

        let index = TaxonomyAggregator::new(&fixture.taxonomies, false)
            .aggregate(std::slice::from_ref(&post), &fixture.localization);
        assert!(index.is_used(TAGS));

        let routes: Vec<String> = fixture
            .builder()
            .taxonomy_routes(&index)
            .into_iter()
            .map(|(r, _)| r)
            .collect();
        assert_eq!(
            routes,
            vec![
                "/series/",
                "/series/intro/",
                "/fr/series/",
                "/tags/",
                "/tags/c/",
                "/tags/rust/",
                "/fr/tags/",
            ]
        );
    }

    #[test]
    fn test_taxonomy_terms_sharing_a_slug_collide() {
        let fixture = Fixture::new();
        let mut post = ContentItem::new("blog/post.md", "blog");
        post.tags = vec!["C".to_owned(), "C++".to_owned()];
        fixture.builder().assign(&mut post);
        let index = TaxonomyAggregator::new(&fixture.taxonomies, false)
            .aggregate(std::slice::from_ref(&post), &fixture.localization);

        let mut table = ResolvedRouteTable::new();
        for (route, origin) in fixture.builder().taxonomy_routes(&index) {
            table.insert(route, origin);
        }

        assert_eq!(table.collisions().len(), 1);
        let collision = &table.collisions()[0];
        assert_eq!(collision.route, "/tags/c/");
        assert_eq!(
            collision.incoming,
            RouteOrigin::TaxonomyTerm {
                taxonomy: TAGS.to_owned(),
                language: "en".to_owned(),
                term: "c++".to_owned(),
            }
        );
    }

    #[test]
    fn test_version_runtime() {
        let fixture = Fixture::new();
        let item = assigned(&fixture, "fr/docs/v1/guide.md", "docs");
        let runtime = fixture.builder().version_runtime(&item);
        let urls: Vec<&str> = runtime.entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/fr/docs/v2/guide/", "/fr/docs/v1/guide/"]);
        assert_eq!(runtime.current.as_deref(), Some("v1"));
        assert!(runtime.show_latest_banner);

        let page = assigned(&fixture, "blog/post.md", "blog");
        assert_eq!(fixture.builder().version_runtime(&page), VersionRuntime::default());
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("post.md"), "post");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("plain"), "plain");
    }
}
