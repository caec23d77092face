//! `rw routes` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_site::SiteBuild;

use super::BuildArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Write the navigation model as JSON to this file.
    #[arg(long)]
    nav_out: Option<PathBuf>,

    /// Print the route table as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, the navigation model can't be
    /// written, or warnings exist in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.build.run()?;

        if self.json {
            output.line(&serde_json::to_string_pretty(&site.routes)?);
        } else {
            print_route_table(&output, &site);
        }

        if let Some(path) = &self.nav_out {
            std::fs::write(path, serde_json::to_string_pretty(&site.navigation)?)?;
            output.info(&format!("Navigation model written to {}", path.display()));
        }

        self.build.report_warnings(&output, &site.warnings)
    }
}

fn print_route_table(output: &Output, site: &SiteBuild) {
    output.highlight(&format!("Routes ({}):", site.routes.len()));
    let width = site.routes.iter().map(|(route, _)| route.len()).max().unwrap_or(0);
    for (route, origin) in site.routes.iter() {
        output.route(route, &origin.to_string(), width);
    }
}
