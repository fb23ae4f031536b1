//! Explain command report data structures.

use fluentgen_codegen::pipeline::{PhaseInfo, phases::LintInfo};

use super::output::{Output, Report};

/// Pipeline phases and validation lints.
#[derive(Debug)]
pub struct ExplainReport {
    pub phases: Vec<PhaseInfo>,
    pub lints: Vec<LintInfo>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("fluentgen pipeline");
        out.newline();

        out.section("Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
    }
}

#[cfg(test)]
mod tests {
    use fluentgen_codegen::pipeline::{Pipeline, phases::ValidatePhase};

    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_render_lists_phases_in_order() {
        let report = ExplainReport {
            phases: Pipeline::new().phases(),
            lints: ValidatePhase::new().lint_info(),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        let numbered: Vec<_> = out
            .lines
            .iter()
            .filter(|l| l.starts_with("  ") && l.contains(". "))
            .map(|l| l.split(" - ").next().unwrap_or_default().trim())
            .collect();
        assert_eq!(
            numbered,
            ["1. validate", "2. lower", "3. resolve", "4. expand", "5. shape"]
        );
        assert!(
            out.lines
                .iter()
                .any(|l| l.starts_with("  - duplicate-type:"))
        );
    }
}
