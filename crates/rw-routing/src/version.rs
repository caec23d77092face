//! Version resolution and version-mounted routes.
//!
//! Each version owns a URL: its explicit override, or `base_path` + name.
//! Routes under `base_path` are mounted under a version by swapping the base
//! for the version URL. Stripping does the opposite, so
//! `strip(apply(r, v)) == strip(r)` for every route.

use std::collections::HashSet;

use rw_config::{TrailingSlash, VersioningConfig};
use serde::{Deserialize, Serialize};

use crate::path::{is_directory_form, normalize_route, route_from_segments, segments, strip_segments};

/// Normalized version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConfig {
    pub name: String,
    pub label: String,
    /// Normalized mount URL.
    pub url: String,
    pub is_default: bool,
    pub is_latest: bool,
    pub deprecated: bool,
}

impl VersionConfig {
    fn url_segments(&self) -> Vec<&str> {
        segments(&self.url).collect()
    }
}

/// Normalized versioning settings for one build.
#[derive(Clone, Debug)]
pub struct Versioning {
    versions: Vec<VersionConfig>,
    base_path: String,
    current: Option<usize>,
    fallback: Option<usize>,
    latest: Option<usize>,
    trailing_slash: TrailingSlash,
}

impl Versioning {
    /// Normalize the `[versions]` section.
    ///
    /// A disabled section behaves like an empty version list.
    #[must_use]
    pub fn new(config: &VersioningConfig, trailing_slash: TrailingSlash) -> Self {
        let base_path = normalize_route(&config.base_path, TrailingSlash::Always);
        let mut versions = Vec::new();

        if config.enabled {
            let mut seen = HashSet::new();
            for spec in &config.list {
                let name = spec.name.trim();
                if name.is_empty() || !seen.insert(name.to_lowercase()) {
                    tracing::debug!(name = %spec.name, "Skipping empty or duplicate version");
                    continue;
                }
                let url = match spec.url.as_deref().filter(|u| !u.trim().is_empty()) {
                    Some(url) => normalize_route(url, trailing_slash),
                    None => route_from_segments(
                        segments(&base_path).chain(std::iter::once(name)),
                        true,
                        trailing_slash,
                    ),
                };
                versions.push(VersionConfig {
                    name: name.to_owned(),
                    label: spec.label.clone().unwrap_or_else(|| name.to_owned()),
                    url,
                    is_default: spec.default,
                    is_latest: spec.latest,
                    deprecated: spec.deprecated,
                });
            }
        }

        let position = |name: &str| {
            versions
                .iter()
                .position(|v| v.name.eq_ignore_ascii_case(name.trim()))
        };

        let current = config.current.as_deref().and_then(|name| {
            let found = position(name);
            if found.is_none() {
                tracing::warn!(version = name, "Configured current version is not declared");
            }
            found
        });
        let latest = versions.iter().position(|v| v.is_latest);
        let default = versions
            .iter()
            .position(|v| v.is_default)
            .or_else(|| config.default.as_deref().and_then(position));
        let fallback = default
            .or(latest)
            .or_else(|| (!versions.is_empty()).then_some(0));

        if let Some(index) = default {
            versions[index].is_default = true;
        }

        Self {
            versions,
            base_path,
            current,
            fallback,
            latest,
            trailing_slash,
        }
    }

    /// Whether any version is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.versions.is_empty()
    }

    /// Declared versions in declaration order.
    #[must_use]
    pub fn versions(&self) -> &[VersionConfig] {
        &self.versions
    }

    /// Version by name (case-insensitive).
    #[must_use]
    pub fn version(&self, name: &str) -> Option<&VersionConfig> {
        let name = name.trim();
        self.versions
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Version forced as current by configuration.
    #[must_use]
    pub fn configured_current(&self) -> Option<&VersionConfig> {
        self.current.map(|i| &self.versions[i])
    }

    /// Fallback version: default, then latest, then first declared.
    #[must_use]
    pub fn fallback_version(&self) -> Option<&VersionConfig> {
        self.fallback.map(|i| &self.versions[i])
    }

    /// Version flagged latest.
    #[must_use]
    pub fn latest_version(&self) -> Option<&VersionConfig> {
        self.latest.map(|i| &self.versions[i])
    }

    /// Version whose URL is the longest case-insensitive prefix of `path`.
    ///
    /// A version mounted at `/` matches every path with zero length.
    #[must_use]
    pub fn version_of_route(&self, path: &str) -> Option<&VersionConfig> {
        let mut best: Option<(usize, &VersionConfig)> = None;
        for version in &self.versions {
            let prefix = version.url_segments();
            if strip_segments(path, &prefix, true).is_some()
                && best.is_none_or(|(len, _)| prefix.len() > len)
            {
                best = Some((prefix.len(), version));
            }
        }
        best.map(|(_, version)| version)
    }

    /// Active version for a path.
    ///
    /// The configured current version wins; then the longest URL prefix
    /// match; then default, latest and first declared, in that order.
    #[must_use]
    pub fn resolve_current_version(&self, path: &str) -> Option<&VersionConfig> {
        self.configured_current()
            .or_else(|| self.version_of_route(path))
            .or_else(|| self.fallback_version())
    }

    /// Version of a content item in a versioned collection.
    ///
    /// A declared name that matches a version wins. Otherwise the first slug
    /// segment is used when it names a version, and the returned flag tells
    /// the caller to consume it. Otherwise the fallback version applies.
    #[must_use]
    pub fn resolve_item_version(&self, declared: Option<&str>, slug: &[&str]) -> (Option<&VersionConfig>, bool) {
        if let Some(version) = declared.and_then(|name| self.version(name)) {
            return (Some(version), false);
        }
        if let Some(version) = slug.first().and_then(|first| self.version(first)) {
            return (Some(version), true);
        }
        (self.fallback_version(), false)
    }

    /// Remove the longest matching version mount and restore the base path.
    ///
    /// Versions mounted at `/` are never stripped.
    #[must_use]
    pub fn strip_version_prefix(&self, route: &str) -> String {
        let directory = is_directory_form(route);
        let mut best: Option<Vec<&str>> = None;
        for version in &self.versions {
            let prefix = version.url_segments();
            if prefix.is_empty() {
                continue;
            }
            if let Some(rest) = strip_segments(route, &prefix, true)
                && best.as_ref().is_none_or(|b| rest.len() < b.len())
            {
                best = Some(rest);
            }
        }
        match best {
            Some(rest) => route_from_segments(
                segments(&self.base_path).chain(rest),
                directory,
                self.trailing_slash,
            ),
            None => route_from_segments(segments(route), directory, self.trailing_slash),
        }
    }

    /// Mount a route under a version URL.
    ///
    /// Any existing version mount is stripped first. Routes outside the base
    /// path, unknown versions and versions mounted at `/` leave the stripped
    /// route unchanged.
    #[must_use]
    pub fn apply_version_prefix(&self, route: &str, name: &str) -> String {
        let stripped = self.strip_version_prefix(route);
        let Some(version) = self.version(name) else {
            return stripped;
        };
        let target = version.url_segments();
        if target.is_empty() {
            return stripped;
        }
        let base: Vec<&str> = segments(&self.base_path).collect();
        match strip_segments(&stripped, &base, false) {
            Some(rest) => route_from_segments(
                target.into_iter().chain(rest),
                is_directory_form(route),
                self.trailing_slash,
            ),
            None => stripped,
        }
    }

    /// Per-version URLs of an unversioned, language-free route.
    #[must_use]
    pub fn build_runtime(&self, route: &str, current: Option<&VersionConfig>) -> VersionRuntime {
        if !self.is_enabled() {
            return VersionRuntime::default();
        }
        let latest = self.latest_version();
        let entries = self
            .versions
            .iter()
            .map(|version| VersionEntry {
                name: version.name.clone(),
                label: version.label.clone(),
                url: self.apply_version_prefix(route, &version.name),
                current: current.is_some_and(|c| c.name == version.name),
                latest: version.is_latest,
                deprecated: version.deprecated,
                default: version.is_default,
            })
            .collect();

        VersionRuntime {
            current: current.map(|v| v.name.clone()),
            latest: latest.map(|v| v.name.clone()),
            show_latest_banner: matches!(
                (current, latest),
                (Some(c), Some(l)) if c.name != l.name
            ),
            entries,
        }
    }
}

/// One entry of the version switcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct VersionEntry {
    pub name: String,
    pub label: String,
    pub url: String,
    pub current: bool,
    pub latest: bool,
    pub deprecated: bool,
    pub default: bool,
}

/// Per-page version data for templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRuntime {
    pub current: Option<String>,
    pub latest: Option<String>,
    /// The page belongs to a version other than the latest one.
    pub show_latest_banner: bool,
    pub entries: Vec<VersionEntry>,
}
