//! Taxonomy term aggregation.
//!
//! Terms come from three places: the first-class `tags` field, the
//! `categories` metadata key, and metadata keys named after a declared
//! taxonomy. Values are flattened and deduplicated case-insensitively per
//! (taxonomy, language); the first spelling seen is kept for display.

use std::collections::{BTreeMap, BTreeSet};

use rw_config::TaxonomySpec;
use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::i18n::Localization;
use crate::path::slugify;

/// Built-in taxonomy fed by the `tags` field.
pub const TAGS: &str = "tags";

/// Built-in taxonomy fed by the `categories` metadata key.
pub const CATEGORIES: &str = "categories";

/// Listing base path of a built-in taxonomy used without a declaration.
#[must_use]
pub fn implicit_base_path(name: &str) -> Option<&'static str> {
    if name.eq_ignore_ascii_case(TAGS) {
        Some("/tags")
    } else if name.eq_ignore_ascii_case(CATEGORIES) {
        Some("/categories")
    } else {
        None
    }
}

/// Distinct term within a (taxonomy, language) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// First spelling seen.
    pub name: String,
    pub slug: String,
    /// Number of items carrying the term.
    pub count: usize,
}

/// Aggregated terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaxonomyIndex {
    terms: BTreeMap<(String, String), Vec<TermEntry>>,
    used: BTreeSet<String>,
}

impl TaxonomyIndex {
    /// Terms of a taxonomy in a language, ordered case-insensitively.
    #[must_use]
    pub fn terms(&self, taxonomy: &str, language: &str) -> &[TermEntry] {
        self.terms
            .get(&(taxonomy.to_owned(), language.to_owned()))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether any item uses the taxonomy.
    #[must_use]
    pub fn is_used(&self, taxonomy: &str) -> bool {
        self.used.iter().any(|t| t.eq_ignore_ascii_case(taxonomy))
    }

    /// Names of every used taxonomy, sorted.
    pub fn used(&self) -> impl Iterator<Item = &str> {
        self.used.iter().map(String::as_str)
    }

    fn record(&mut self, taxonomy: &str, language: &str, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.used.insert(taxonomy.to_owned());
        let terms = self
            .terms
            .entry((taxonomy.to_owned(), language.to_owned()))
            .or_default();
        for value in values {
            if let Some(entry) = terms.iter_mut().find(|t| t.name.to_lowercase() == value.to_lowercase()) {
                entry.count += 1;
            } else {
                terms.push(TermEntry {
                    slug: slugify(&value),
                    name: value,
                    count: 1,
                });
            }
        }
    }

    fn sort(&mut self) {
        for terms in self.terms.values_mut() {
            terms.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }
}

/// Collects taxonomy terms from routed content items.
#[derive(Debug)]
pub struct TaxonomyAggregator<'a> {
    taxonomies: &'a [TaxonomySpec],
    include_drafts: bool,
}

impl<'a> TaxonomyAggregator<'a> {
    /// Create an aggregator over the declared taxonomies.
    ///
    /// # Panics
    ///
    /// Panics when a declared taxonomy has an empty name.
    #[must_use]
    pub fn new(taxonomies: &'a [TaxonomySpec], include_drafts: bool) -> Self {
        assert!(
            taxonomies.iter().all(|t| !t.name.trim().is_empty()),
            "taxonomy names must not be empty"
        );
        Self {
            taxonomies,
            include_drafts,
        }
    }

    /// Canonical name for a taxonomy: the declared spelling when declared.
    fn canonical<'n>(&'n self, name: &'n str) -> &'n str {
        self.taxonomies
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map_or(name, |t| t.name.as_str())
    }

    /// Aggregate terms per (taxonomy, language).
    #[must_use]
    pub fn aggregate(&self, items: &[ContentItem], localization: &Localization) -> TaxonomyIndex {
        let mut index = TaxonomyIndex::default();

        for item in items.iter().filter(|i| i.is_published(self.include_drafts)) {
            let language =
                localization.resolve_effective_language_code(item.language.as_deref().unwrap_or_default());

            let mut per_item: BTreeMap<&str, Vec<String>> = BTreeMap::new();

            let mut tags: Vec<String> = item.tags.clone();
            if let Some(value) = item.meta(TAGS) {
                tags.extend(taxonomy_values(value));
            }
            per_item.entry(self.canonical(TAGS)).or_default().extend(tags);

            if let Some(value) = item.meta(CATEGORIES) {
                per_item
                    .entry(self.canonical(CATEGORIES))
                    .or_default()
                    .extend(taxonomy_values(value));
            }

            for taxonomy in self.taxonomies {
                if implicit_base_path(&taxonomy.name).is_some() {
                    continue;
                }
                if let Some(value) = item.meta(&taxonomy.name) {
                    per_item
                        .entry(taxonomy.name.as_str())
                        .or_default()
                        .extend(taxonomy_values(value));
                }
            }

            for (taxonomy, values) in per_item {
                index.record(taxonomy, language, dedup_terms(values));
            }
        }

        index.sort();
        tracing::debug!(taxonomies = index.used.len(), "Aggregated taxonomy terms");
        index
    }
}

/// Flatten a metadata value into trimmed term strings.
///
/// Strings are split on `,` and `;`; arrays contribute each string element
/// the same way. Other value types contribute nothing.
#[must_use]
pub fn taxonomy_values(value: &serde_json::Value) -> Vec<String> {
    fn split(raw: &str) -> impl Iterator<Item = String> + '_ {
        raw.split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }

    match value {
        serde_json::Value::String(raw) => split(raw).collect(),
        serde_json::Value::Array(values) => values
            .iter()
            .filter_map(serde_json::Value::as_str)
            .flat_map(split)
            .collect(),
        _ => Vec::new(),
    }
}

/// Case-insensitive dedup keeping the first spelling.
fn dedup_terms(values: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
        .collect()
}
