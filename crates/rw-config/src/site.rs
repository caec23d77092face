//! Site-level sections: build policy, localization, versioning,
//! collections and taxonomies.

use serde::{Deserialize, Serialize};

/// Trailing-slash policy applied uniformly to every route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Every route ends with `/`.
    #[default]
    Always,
    /// No route ends with `/` (except the root).
    Never,
    /// Keep whatever the joined input had.
    Preserve,
}

/// `[build]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Trailing-slash policy for every generated route.
    pub trailing_slash: TrailingSlash,
    /// Include draft items in the route table and taxonomies.
    pub drafts: bool,
    /// Feature flags (e.g. `api-docs`) consulted by surface inference.
    pub features: Vec<String>,
}

impl BuildConfig {
    /// Check whether a feature flag is enabled (case-insensitive).
    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.eq_ignore_ascii_case(name))
    }
}

/// `[i18n]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Default language code. Used when no language is flagged `default`.
    pub default_language: Option<String>,
    /// Derive a page's language from its first source path segment.
    pub detect_from_path: bool,
    /// Prefix routes of the default language too.
    pub prefix_default: bool,
    /// Configured languages.
    pub languages: Vec<LanguageSpec>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            default_language: None,
            detect_from_path: true,
            prefix_default: false,
            languages: Vec::new(),
        }
    }
}

/// Declared language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSpec {
    /// Language code (e.g. "en", "pt-BR").
    pub code: String,
    /// Display label (defaults to the code).
    pub label: Option<String>,
    /// Route prefix (defaults to the normalized code).
    pub prefix: Option<String>,
    /// Explicit default flag.
    pub default: bool,
}

/// `[versions]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    pub enabled: bool,
    /// Mount point under which version names are appended.
    pub base_path: String,
    /// Version name forced as current for every page.
    pub current: Option<String>,
    /// Default version name (alternative to the per-version flag).
    pub default: Option<String>,
    /// Declared versions, newest first by convention.
    pub list: Vec<VersionSpec>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_path: "/".to_owned(),
            current: None,
            default: None,
            list: Vec::new(),
        }
    }
}

/// Declared version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct VersionSpec {
    pub name: String,
    pub label: Option<String>,
    /// Explicit URL, replacing `base_path` + name.
    pub url: Option<String>,
    pub default: bool,
    pub latest: bool,
    pub deprecated: bool,
}

/// `[[collections]]` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSpec {
    pub name: String,
    /// Output base path (defaults to `/{name}`).
    pub base_path: Option<String>,
    /// Source directory relative to the content root (defaults to the name).
    pub source_dir: Option<String>,
    /// Items are mounted under a version URL.
    pub versioned: bool,
    /// Synthesize an index listing at the base route for every language.
    pub index: bool,
}

impl CollectionSpec {
    /// Output base path, falling back to `/{name}`.
    #[must_use]
    pub fn output_base(&self) -> String {
        self.base_path
            .clone()
            .unwrap_or_else(|| format!("/{}", self.name))
    }

    /// Source directory, falling back to the collection name.
    #[must_use]
    pub fn source_root(&self) -> &str {
        self.source_dir.as_deref().unwrap_or(&self.name)
    }
}

/// `[[taxonomies]]` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomySpec {
    pub name: String,
    /// Listing base path. Without one, no listing routes are synthesized.
    pub base_path: Option<String>,
    pub label: Option<String>,
}
