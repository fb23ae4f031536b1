use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use fluentgen_manifest::FluentToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to fluent.toml (defaults to ./fluent.toml)
    #[arg(short, long, default_value = "fluent.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let fluent_toml = FluentToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(fluent_toml.manifest(), &self.config)?;

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
