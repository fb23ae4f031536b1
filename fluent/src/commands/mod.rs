mod check;
mod completions;
mod contract;
mod explain;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use contract::ContractCommand;
use eyre::Result;
use explain::ExplainCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for fluentgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "fluent")]
#[command(version)]
#[command(about = "Derive fluent builder contracts from TOML type declarations")]
pub(crate) struct Cli {
    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Default log level selected by `-v`/`-q`.
    pub fn verbosity(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Contract(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate fluent.toml and summarize buildables and descendants
    Check(CheckCommand),

    /// Print the builder contracts derived from fluent.toml
    Contract(ContractCommand),

    /// Show the pipeline phases and lints
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::parse_from(["fluent", "check"]);
        assert_eq!(cli.verbosity(), "warn");

        let cli = Cli::parse_from(["fluent", "-vv", "check"]);
        assert_eq!(cli.verbosity(), "trace");

        let cli = Cli::parse_from(["fluent", "contract", "--quiet"]);
        assert_eq!(cli.verbosity(), "error");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["fluent", "-v", "-q", "check"]).is_err());
    }
}
