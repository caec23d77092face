//! Post-routing site checks.
//!
//! Every finding is a human-readable warning. Nothing here fails a build;
//! callers decide whether warnings are fatal.

use std::collections::{BTreeMap, BTreeSet};

use rw_routing::taxonomy::{CATEGORIES, TAGS, implicit_base_path};
use rw_routing::{ContentItem, ResolvedRouteTable, TaxonomyIndex};

use crate::context::BuildContext;

/// Checks a routed site for authoring mistakes.
#[derive(Clone, Copy, Debug)]
pub struct SiteVerifier<'a> {
    context: &'a BuildContext,
}

impl<'a> SiteVerifier<'a> {
    #[must_use]
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }

    /// Run every check, in a fixed order.
    #[must_use]
    pub fn verify(
        &self,
        items: &[ContentItem],
        routes: &ResolvedRouteTable,
        taxonomies: &TaxonomyIndex,
    ) -> Vec<String> {
        let mut warnings = self.check_collisions(routes);
        warnings.extend(self.check_landing_pages(items, routes));
        warnings.extend(self.check_taxonomies(taxonomies));
        warnings.extend(self.check_translations(items));
        for warning in &warnings {
            tracing::debug!(%warning, "Site verification");
        }
        warnings
    }

    /// One warning per rejected route write.
    #[must_use]
    pub fn check_collisions(&self, routes: &ResolvedRouteTable) -> Vec<String> {
        routes
            .collisions()
            .iter()
            .map(|c| {
                format!(
                    "Route collision at '{}': {} conflicts with {}",
                    c.route, c.incoming, c.existing
                )
            })
            .collect()
    }

    /// Editorial collections need a landing page in every language.
    #[must_use]
    pub fn check_landing_pages(&self, items: &[ContentItem], routes: &ResolvedRouteTable) -> Vec<String> {
        let collections: BTreeSet<&str> = items
            .iter()
            .filter(|i| !i.draft)
            .map(|i| i.collection.as_str())
            .filter(|c| self.context.is_editorial(c))
            .collect();

        let builder = self.context.route_builder();
        let mut warnings = Vec::new();
        for collection in collections {
            for language in self.context.localization.languages() {
                let landing = builder.landing_route(collection, &language.code);
                if !routes.contains(&landing) {
                    warnings.push(format!(
                        "Collection '{collection}' has no landing page at '{landing}' for language '{}'",
                        language.code
                    ));
                }
            }
        }
        warnings
    }

    /// Built-ins used without a declaration, and declarations nobody uses.
    #[must_use]
    pub fn check_taxonomies(&self, index: &TaxonomyIndex) -> Vec<String> {
        let builder = self.context.route_builder();
        let declared = |name: &str| {
            self.context
                .taxonomies
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(name))
        };

        let mut warnings = Vec::new();
        for builtin in [TAGS, CATEGORIES] {
            if index.is_used(builtin) && !declared(builtin) {
                let base = implicit_base_path(builtin).map_or_else(String::new, |b| builder.build_route(b, ""));
                warnings.push(format!(
                    "Taxonomy '{builtin}' is used by content but not declared in the site configuration; \
                     routes use the implicit base path '{base}'"
                ));
            }
        }
        for taxonomy in &self.context.taxonomies {
            if !index.is_used(&taxonomy.name) {
                warnings.push(format!(
                    "Taxonomy '{}' is declared but no content uses it",
                    taxonomy.name
                ));
            }
        }
        warnings
    }

    /// Translation keys seen in several languages must cover all of them,
    /// and map to one page per language.
    #[must_use]
    pub fn check_translations(&self, items: &[ContentItem]) -> Vec<String> {
        let localization = &self.context.localization;

        type Group<'i> = BTreeMap<&'i str, Vec<&'i str>>;
        let mut groups: BTreeMap<(Option<&str>, &str), Group<'_>> = BTreeMap::new();
        for item in items.iter().filter(|i| i.is_published(self.context.include_drafts)) {
            let (Some(key), Some(language)) = (item.translation_key.as_deref(), item.language.as_deref()) else {
                continue;
            };
            groups
                .entry((item.project.as_deref(), key))
                .or_default()
                .entry(language)
                .or_default()
                .push(&item.source_path);
        }

        let mut warnings = Vec::new();
        for ((project, key), languages) in groups {
            let subject = match project {
                Some(project) => format!("Translation '{key}' in project '{project}'"),
                None => format!("Translation '{key}'"),
            };
            if languages.len() >= 2 && localization.languages().len() >= 2 {
                let missing: Vec<&str> = localization
                    .languages()
                    .iter()
                    .map(|l| l.code.as_str())
                    .filter(|code| !languages.contains_key(code))
                    .collect();
                if !missing.is_empty() {
                    warnings.push(format!("{subject} is missing languages: {}", missing.join(", ")));
                }
            }
            for (language, sources) in &languages {
                if sources.len() > 1 {
                    warnings.push(format!(
                        "{subject} maps to several '{language}' pages: {}",
                        sources.join(", ")
                    ));
                }
            }
        }
        warnings
    }
}
