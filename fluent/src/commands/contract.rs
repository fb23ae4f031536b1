use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use fluentgen_manifest::FluentToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, ContractOptions},
    reports::{Report, TerminalOutput},
};

/// Output format for builder contracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ContractCommand {
    /// Path to fluent.toml (defaults to ./fluent.toml)
    #[arg(short, long, default_value = "fluent.toml")]
    pub config: PathBuf,

    /// Only print the contract of this type (fully-qualified name)
    #[arg(short = 't', long = "type")]
    pub type_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: Format,

    /// Write a JSON snapshot of each pipeline phase into this directory
    #[arg(long, value_name = "DIR")]
    pub snapshots: Option<PathBuf>,
}

impl ContractCommand {
    pub fn run(&self) -> Result<()> {
        let fluent_toml = FluentToml::open(&self.config).unwrap_or_exit();
        let options = ContractOptions {
            type_name: self.type_name.clone(),
            snapshots: self.snapshots.clone(),
        };
        let report = ops::contract(fluent_toml.manifest(), &options)?;

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => {
                let json = serde_json::to_string_pretty(&report.shapes)
                    .wrap_err("Failed to serialize builder contracts")?;
                println!("{}", json);
            }
        }
        Ok(())
    }
}
