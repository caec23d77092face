//! Site specification for RW.
//!
//! Parses `rw.toml` into a [`SiteSpec`] with serde and provides
//! auto-discovery of config files in parent directories. The specification
//! is loaded once per build and read-only afterwards.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `i18n.default_language`
//! - `versions.base_path`
//! - `versions.current`
//! - `versions.default`

mod expand;
pub mod navigation;
mod site;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use navigation::{
    AxisPolicies, AxisPolicy, FooterColumnSpec, MenuItemSpec, MenuSpec, NavigationFooterSpec,
    NavigationProfileSpec, NavigationRegionSpec, NavigationSpec, NavigationSurfaceSpec,
    ProfileMatchSpec, RenderContextSpec, VisibilitySpec,
};
pub use site::{
    BuildConfig, CollectionSpec, LanguageSpec, LocalizationConfig, TaxonomySpec, TrailingSlash,
    VersionSpec, VersioningConfig,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override trailing-slash policy.
    pub trailing_slash: Option<TrailingSlash>,
    /// Override draft inclusion.
    pub drafts: Option<bool>,
    /// Override the current version name.
    pub current_version: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Declarative site specification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSpec {
    /// Build policy.
    pub build: BuildConfig,
    /// Language configuration.
    pub i18n: LocalizationConfig,
    /// Version configuration.
    pub versions: VersioningConfig,
    /// Content collections.
    pub collections: Vec<CollectionSpec>,
    /// Declared taxonomies.
    pub taxonomies: Vec<TaxonomySpec>,
    /// Navigation tree.
    pub navigation: NavigationSpec,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`versions.current`").
        field: String,
        /// Error message (e.g., "${`DOCS_VERSION`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty (after trimming).
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require every name in a list to be unique (case-insensitive).
fn require_unique<'a>(
    names: impl IntoIterator<Item = &'a str>,
    field: &str,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "{field} contains duplicate name '{name}'"
            )));
        }
    }
    Ok(())
}

impl SiteSpec {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rw.toml` in current directory and parents,
    /// falling back to an empty specification.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut spec = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using empty site specification");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            spec.apply_cli_settings(settings);
        }

        Ok(spec)
    }

    /// Parse and validate a specification from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, env expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut spec: Self = toml::from_str(content)?;
        spec.expand_env_vars()?;
        spec.validate()?;
        Ok(spec)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(trailing_slash) = settings.trailing_slash {
            self.build.trailing_slash = trailing_slash;
        }
        if let Some(drafts) = settings.drafts {
            self.build.drafts = drafts;
        }
        if let Some(current) = &settings.current_version {
            self.versions.current = Some(current.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut spec = Self::from_toml_str(&content)?;
        spec.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded site specification");
        Ok(spec)
    }

    /// Look up a collection by name.
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Look up a declared taxonomy by name (case-insensitive).
    #[must_use]
    pub fn taxonomy(&self, name: &str) -> Option<&TaxonomySpec> {
        self.taxonomies
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. Content-level problems
    /// are not checked here; they surface as build warnings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_languages()?;
        self.validate_versions()?;
        self.validate_collections()?;
        self.validate_taxonomies()?;
        self.validate_navigation()?;
        Ok(())
    }

    fn validate_languages(&self) -> Result<(), ConfigError> {
        for language in &self.i18n.languages {
            require_non_empty(&language.code, "i18n.languages.code")?;
        }
        Ok(())
    }

    fn validate_versions(&self) -> Result<(), ConfigError> {
        for version in &self.versions.list {
            require_non_empty(&version.name, "versions.list.name")?;
        }
        Ok(())
    }

    fn validate_collections(&self) -> Result<(), ConfigError> {
        for collection in &self.collections {
            require_non_empty(&collection.name, "collections.name")?;
        }
        require_unique(
            self.collections.iter().map(|c| c.name.as_str()),
            "collections",
        )
    }

    fn validate_taxonomies(&self) -> Result<(), ConfigError> {
        for taxonomy in &self.taxonomies {
            require_non_empty(&taxonomy.name, "taxonomies.name")?;
        }
        require_unique(
            self.taxonomies.iter().map(|t| t.name.as_str()),
            "taxonomies",
        )
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        for profile in &self.navigation.profiles {
            require_non_empty(&profile.name, "navigation.profiles.name")?;
        }
        for surface in &self.navigation.surfaces {
            require_non_empty(&surface.name, "navigation.surfaces.name")?;
            require_non_empty(&surface.primary_menu, "navigation.surfaces.primary_menu")?;
        }
        require_unique(
            self.navigation.surfaces.iter().map(|s| s.name.as_str()),
            "navigation.surfaces",
        )
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_env_opt(&mut self.i18n.default_language, "i18n.default_language")?;
        self.versions.base_path = expand::expand_env(&self.versions.base_path, "versions.base_path")?;
        expand::expand_env_opt(&mut self.versions.current, "versions.current")?;
        expand::expand_env_opt(&mut self.versions.default, "versions.default")?;
        Ok(())
    }
}
