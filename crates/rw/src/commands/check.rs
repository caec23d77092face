//! `rw check` command implementation.

use clap::Args;

use super::BuildArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub build: BuildArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or warnings exist in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.build.run()?;

        let surfaces: Vec<&str> = site.navigation.surfaces.iter().map(|s| s.name.as_str()).collect();
        output.info(&format!(
            "{} items, {} routes, surfaces: {}",
            site.items.len(),
            site.routes.len(),
            if surfaces.is_empty() { "none".to_owned() } else { surfaces.join(", ") }
        ));

        self.build.report_warnings(&output, &site.warnings)
    }
}
