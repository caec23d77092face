//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod routes;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rw_config::{CliSettings, SiteSpec, TrailingSlash};
use rw_site::{SiteBuild, build_site};

use crate::error::CliError;
use crate::manifest::load_manifest;
use crate::output::Output;

pub(crate) use check::CheckArgs;
pub(crate) use routes::RoutesArgs;

/// Trailing-slash policy accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum TrailingSlashArg {
    Always,
    Never,
    Preserve,
}

impl From<TrailingSlashArg> for TrailingSlash {
    fn from(arg: TrailingSlashArg) -> Self {
        match arg {
            TrailingSlashArg::Always => Self::Always,
            TrailingSlashArg::Never => Self::Never,
            TrailingSlashArg::Preserve => Self::Preserve,
        }
    }
}

/// Arguments shared by every command that runs the routing pass.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content manifest (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long)]
    content: PathBuf,

    /// Include draft items (overrides config).
    #[arg(long)]
    drafts: bool,

    /// Trailing-slash policy (overrides config).
    #[arg(long, value_enum)]
    trailing_slash: Option<TrailingSlashArg>,

    /// Version forced as current for every page (overrides config).
    #[arg(long)]
    current_version: Option<String>,

    /// Exit with an error when the build reports warnings.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            trailing_slash: self.trailing_slash.map(Into::into),
            drafts: self.drafts.then_some(true),
            current_version: self.current_version.clone(),
        }
    }

    /// Load the site specification and manifest, then run the routing pass.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or manifest loading fails.
    pub(crate) fn run(&self) -> Result<SiteBuild, CliError> {
        let spec = SiteSpec::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let items = load_manifest(&self.content)?;
        Ok(build_site(&spec, items))
    }

    /// Print warnings, failing under `--strict` when there are any.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Validation` in strict mode if warnings exist.
    pub(crate) fn report_warnings(&self, output: &Output, warnings: &[String]) -> Result<(), CliError> {
        if warnings.is_empty() {
            output.success("No warnings.");
            return Ok(());
        }

        output.warning(&format!("\nWarnings ({}):", warnings.len()));
        for warning in warnings {
            output.warning(&format!("  - {warning}"));
        }

        if self.strict {
            return Err(CliError::Validation(format!(
                "{} warning(s) reported in strict mode",
                warnings.len()
            )));
        }
        Ok(())
    }
}
