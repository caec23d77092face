//! Language resolution and language-prefixed routes.
//!
//! [`Localization`] normalizes the `[i18n]` section once per build. When no
//! language is configured a synthetic single-language, disabled setup is
//! substituted so callers never branch on "localization absent".
//!
//! # Prefix rules
//!
//! - Every language has a prefix (declared, or its normalized code).
//! - The default language is unprefixed unless `prefix_default` is set.
//! - [`Localization::apply_language_prefix`] mounts a base route and never
//!   inspects it, so a base route that happens to start with a prefix
//!   segment (`/fr/guide/` in English) is kept whole.
//! - [`Localization::strip_language_prefix_of`] undoes exactly that mount:
//!   `strip_of(apply(r, l), l) == r`.
//! - [`Localization::relocalize`] moves a routed page from one language to
//!   another.

use std::collections::{BTreeMap, HashSet};

use rw_config::{LocalizationConfig, TrailingSlash};
use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::path::{is_directory_form, normalize_token, route_from_segments, segments, strip_segments};

/// Code used when nothing else is configured.
const FALLBACK_LANGUAGE: &str = "en";

/// Normalized language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Normalized code (lowercase, hyphenated).
    pub code: String,
    pub label: String,
    /// Route prefix segment. Empty only for the synthetic language.
    pub prefix: String,
    pub is_default: bool,
}

/// Language assigned to a content item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemLanguage<'a> {
    pub language: &'a LanguageConfig,
    /// Source path with the language segment removed when it was detected.
    pub relative_path: String,
    /// The language came from the source path rather than front matter.
    pub from_path: bool,
}

/// Normalized localization settings for one build.
#[derive(Clone, Debug)]
pub struct Localization {
    languages: Vec<LanguageConfig>,
    default_index: usize,
    enabled: bool,
    detect_from_path: bool,
    prefix_default: bool,
    trailing_slash: TrailingSlash,
}

impl Localization {
    /// Normalize the `[i18n]` section.
    ///
    /// Languages are deduplicated by normalized code (first wins). The
    /// effective default is the explicitly flagged language, else the one
    /// matching `default_language`, else the first.
    #[must_use]
    pub fn new(config: &LocalizationConfig, trailing_slash: TrailingSlash) -> Self {
        let mut seen = HashSet::new();
        let mut languages = Vec::new();
        let mut flagged = None;

        for spec in &config.languages {
            let code = normalize_token(&spec.code);
            if code.is_empty() || !seen.insert(code.clone()) {
                tracing::debug!(code = %spec.code, "Skipping empty or duplicate language");
                continue;
            }
            if spec.default && flagged.is_none() {
                flagged = Some(languages.len());
            }
            let prefix = spec
                .prefix
                .as_deref()
                .map(|p| p.trim().trim_matches('/').to_owned())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| code.clone());
            languages.push(LanguageConfig {
                label: spec
                    .label
                    .clone()
                    .unwrap_or_else(|| spec.code.trim().to_owned()),
                code,
                prefix,
                is_default: false,
            });
        }

        let configured_default = config
            .default_language
            .as_deref()
            .map(normalize_token)
            .filter(|c| !c.is_empty());

        if languages.is_empty() {
            let code = configured_default.unwrap_or_else(|| FALLBACK_LANGUAGE.to_owned());
            return Self {
                languages: vec![LanguageConfig {
                    label: code.clone(),
                    code,
                    prefix: String::new(),
                    is_default: true,
                }],
                default_index: 0,
                enabled: false,
                detect_from_path: false,
                prefix_default: false,
                trailing_slash,
            };
        }

        let default_index = flagged
            .or_else(|| {
                configured_default
                    .as_deref()
                    .and_then(|code| languages.iter().position(|l| l.code == code))
            })
            .unwrap_or(0);
        languages[default_index].is_default = true;

        Self {
            languages,
            default_index,
            enabled: true,
            detect_from_path: config.detect_from_path,
            prefix_default: config.prefix_default,
            trailing_slash,
        }
    }

    /// Whether languages were configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Configured languages in declaration order.
    #[must_use]
    pub fn languages(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// The effective default language.
    #[must_use]
    pub fn default_language(&self) -> &LanguageConfig {
        &self.languages[self.default_index]
    }

    /// Language by exact normalized code.
    #[must_use]
    pub fn language(&self, code: &str) -> Option<&LanguageConfig> {
        let code = normalize_token(code);
        self.languages.iter().find(|l| l.code == code)
    }

    /// Match a raw token against configured languages without falling back.
    ///
    /// Tries the exact code, then the declared prefix, then the primary
    /// subtag (`fr-ca` matches `fr` and vice versa).
    #[must_use]
    pub fn match_language(&self, token: &str) -> Option<&LanguageConfig> {
        let token = normalize_token(token);
        if token.is_empty() {
            return None;
        }
        if let Some(language) = self.languages.iter().find(|l| l.code == token) {
            return Some(language);
        }
        if let Some(language) = self
            .languages
            .iter()
            .find(|l| !l.prefix.is_empty() && l.prefix.eq_ignore_ascii_case(&token))
        {
            return Some(language);
        }
        let primary = primary_subtag(&token);
        self.languages
            .iter()
            .find(|l| primary_subtag(&l.code) == primary)
    }

    /// Resolve any token to a configured language code. Never fails.
    #[must_use]
    pub fn resolve_effective_language_code(&self, token: &str) -> &str {
        self.match_language(token)
            .unwrap_or_else(|| self.default_language())
            .code
            .as_str()
    }

    /// Detect a language from the first segment of a source path.
    ///
    /// Returns the detected language (if any) and the path relative to the
    /// language directory.
    #[must_use]
    pub fn detect_path_language(&self, source_path: &str) -> (Option<&LanguageConfig>, String) {
        let parts: Vec<&str> = segments(source_path).collect();
        if self.enabled
            && self.detect_from_path
            && let Some(first) = parts.first()
            && let Some(language) = self.languages.iter().find(|l| l.prefix == *first)
        {
            return (Some(language), parts[1..].join("/"));
        }
        (None, parts.join("/"))
    }

    /// Resolve the language of a content item.
    ///
    /// A front-matter token that matches a configured language overrides the
    /// path-derived language; otherwise the path decides, then the default.
    #[must_use]
    pub fn resolve_item_language(&self, declared: Option<&str>, source_path: &str) -> ItemLanguage<'_> {
        let (from_path, relative_path) = self.detect_path_language(source_path);
        let declared_match = declared.and_then(|token| {
            let matched = self.match_language(token);
            if matched.is_none() {
                tracing::debug!(
                    token,
                    path = source_path,
                    "Front-matter language matches no configured language"
                );
            }
            matched
        });

        let language = declared_match
            .or(from_path)
            .unwrap_or_else(|| self.default_language());

        ItemLanguage {
            language,
            relative_path,
            from_path: declared_match.is_none() && from_path.is_some(),
        }
    }

    /// Prefix segment used in routes for a language, if any.
    fn route_prefix<'a>(&self, language: &'a LanguageConfig) -> Option<&'a str> {
        if !self.enabled || language.prefix.is_empty() {
            return None;
        }
        if language.is_default && !self.prefix_default {
            return None;
        }
        Some(&language.prefix)
    }

    /// Language whose route prefix starts the route, with the remaining segments.
    fn split_route<'r>(&self, route: &'r str) -> (Option<&LanguageConfig>, Vec<&'r str>) {
        for language in &self.languages {
            if let Some(prefix) = self.route_prefix(language)
                && let Some(rest) = strip_segments(route, &[prefix], false)
            {
                return (Some(language), rest);
            }
        }
        (None, segments(route).collect())
    }

    /// Effective language of any route: its prefix, else the default.
    #[must_use]
    pub fn language_of_route(&self, route: &str) -> &LanguageConfig {
        self.split_route(route)
            .0
            .unwrap_or_else(|| self.default_language())
    }

    /// Remove a leading language prefix segment, if present.
    ///
    /// The language is guessed from the route. When the page's language is
    /// known, [`Self::strip_language_prefix_of`] is exact.
    #[must_use]
    pub fn strip_language_prefix(&self, route: &str) -> String {
        let (_, rest) = self.split_route(route);
        route_from_segments(rest, is_directory_form(route), self.trailing_slash)
    }

    /// Language for a code, resolving unknown codes to the default.
    fn language_for(&self, code: &str) -> &LanguageConfig {
        let code = self.resolve_effective_language_code(code);
        self.languages
            .iter()
            .find(|l| l.code == code)
            .unwrap_or_else(|| self.default_language())
    }

    /// Mount a base route under a language's prefix.
    ///
    /// Unknown codes resolve through [`Self::resolve_effective_language_code`].
    /// A language without a route prefix leaves the route as it is.
    #[must_use]
    pub fn apply_language_prefix(&self, route: &str, code: &str) -> String {
        let directory = is_directory_form(route);
        match self.route_prefix(self.language_for(code)) {
            Some(prefix) => route_from_segments(
                std::iter::once(prefix).chain(segments(route)),
                directory,
                self.trailing_slash,
            ),
            None => route_from_segments(segments(route), directory, self.trailing_slash),
        }
    }

    /// Remove one language's prefix from a route of a page in that language.
    #[must_use]
    pub fn strip_language_prefix_of(&self, route: &str, code: &str) -> String {
        let rest = self
            .route_prefix(self.language_for(code))
            .and_then(|prefix| strip_segments(route, &[prefix], false))
            .unwrap_or_else(|| segments(route).collect());
        route_from_segments(rest, is_directory_form(route), self.trailing_slash)
    }

    /// Move a route of a page in `from` under the prefix of `to`.
    #[must_use]
    pub fn relocalize(&self, route: &str, from: &str, to: &str) -> String {
        self.apply_language_prefix(&self.strip_language_prefix_of(route, from), to)
    }

    /// Peer URLs of a page in every configured language.
    ///
    /// Each language prefers the route of a non-draft item sharing the page's
    /// translation key and project; otherwise the page's own route is
    /// re-prefixed. Exactly one entry is flagged current.
    #[must_use]
    pub fn build_runtime(&self, page: &ContentItem, index: &TranslationIndex) -> LocalizationRuntime {
        let route = page.route.as_deref().unwrap_or("/");
        let current = self
            .resolve_effective_language_code(page.language.as_deref().unwrap_or_default())
            .to_owned();

        if !self.enabled {
            let language = self.default_language();
            return LocalizationRuntime {
                current: language.code.clone(),
                alternates: vec![LanguageAlternate {
                    code: language.code.clone(),
                    label: language.label.clone(),
                    url: route.to_owned(),
                    current: true,
                }],
            };
        }

        let alternates = self
            .languages
            .iter()
            .map(|language| {
                let is_current = language.code == current;
                let url = if is_current {
                    route.to_owned()
                } else {
                    page.translation_key
                        .as_deref()
                        .and_then(|key| index.lookup(page.project.as_deref(), key, &language.code))
                        .map_or_else(
                            || self.relocalize(route, &current, &language.code),
                            str::to_owned,
                        )
                };
                LanguageAlternate {
                    code: language.code.clone(),
                    label: language.label.clone(),
                    url,
                    current: is_current,
                }
            })
            .collect();

        LocalizationRuntime { current, alternates }
    }
}

/// Primary subtag of a normalized code (`pt-br` → `pt`).
fn primary_subtag(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Lookup of routed, non-draft items by `(project, translation key, language)`.
#[derive(Debug, Default)]
pub struct TranslationIndex {
    routes: BTreeMap<(Option<String>, String, String), String>,
}

impl TranslationIndex {
    /// Index annotated items. The first item for a triple wins.
    #[must_use]
    pub fn new(items: &[ContentItem]) -> Self {
        let mut routes = BTreeMap::new();
        for item in items.iter().filter(|i| !i.draft) {
            let (Some(key), Some(language), Some(route)) =
                (&item.translation_key, &item.language, &item.route)
            else {
                continue;
            };
            routes
                .entry((item.project.clone(), key.clone(), language.clone()))
                .or_insert_with(|| route.clone());
        }
        Self { routes }
    }

    /// Route of the variant in `language`, if one exists.
    #[must_use]
    pub fn lookup(&self, project: Option<&str>, key: &str, language: &str) -> Option<&str> {
        self.routes
            .get(&(project.map(str::to_owned), key.to_owned(), language.to_owned()))
            .map(String::as_str)
    }
}

/// One entry of the language switcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageAlternate {
    pub code: String,
    pub label: String,
    pub url: String,
    pub current: bool,
}

/// Per-page localization data for templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationRuntime {
    /// Code of the page's language.
    pub current: String,
    pub alternates: Vec<LanguageAlternate>,
}
