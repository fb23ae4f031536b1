//! Contract command report data structures.

use fluentgen_codegen::BuilderShape;

use super::output::{Output, Report};

/// Builder contracts produced by the pipeline.
#[derive(Debug)]
pub struct ContractReport {
    pub shapes: Vec<BuilderShape>,
    /// Number of warnings raised while generating.
    pub warnings: usize,
}

impl Report for ContractReport {
    fn render(&self, out: &mut dyn Output) {
        for (i, shape) in self.shapes.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.preformatted(shape.to_string().trim_end());
        }

        if self.warnings > 0 {
            out.newline();
            out.warning(&format!(
                "{} warning{} (run `fluent check` for details)",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
    }
}
