//! Content items produced by the discovery stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of page an item renders as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Regular page.
    #[default]
    Page,
    /// Landing page of a collection or directory (`index.md`, `_index.md`).
    Index,
}

/// Content item as handed over by discovery and front-matter parsing.
///
/// Routing reads `source_path`, `collection`, `draft`, `tags` and `metadata`,
/// and writes back `language` (resolved code), `translation_key`, `version`
/// and `route`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    /// Source path relative to the content root (e.g. `fr/blog/hello.md`).
    pub source_path: String,
    /// Final public route. `None` until routing has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Raw front-matter language token before routing, resolved code after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Identifier shared by all language variants of the same page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_key: Option<String>,
    /// Version name, for items in versioned collections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Owning collection name.
    pub collection: String,
    pub kind: PageKind,
    pub draft: bool,
    /// Canonical override. A path (`/...`) becomes the route verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    /// Project scope for multi-project sites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// First-class tags field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Remaining front-matter values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ContentItem {
    /// Create an item for a source path in a collection.
    #[must_use]
    pub fn new(source_path: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            collection: collection.into(),
            ..Default::default()
        }
    }

    /// Metadata value by key, matched case-insensitively.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key).or_else(|| {
            self.metadata
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    /// Non-empty string metadata value by key.
    #[must_use]
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta(key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether the item takes part in the route table and taxonomies.
    #[must_use]
    pub fn is_published(&self, include_drafts: bool) -> bool {
        include_drafts || !self.draft
    }
}
