use clap::Args;
use eyre::Result;
use fluentgen_codegen::pipeline::{Pipeline, phases::ValidatePhase};

use crate::reports::{ExplainReport, Report, TerminalOutput};

#[derive(Args)]
pub struct ExplainCommand {}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        // Descriptions come from the Phase and Lint traits
        let report = ExplainReport {
            phases: Pipeline::new().phases(),
            lints: ValidatePhase::new().lint_info(),
        };
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
