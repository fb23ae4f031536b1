//! Expand phase - adds descendant substitutes to buildable properties.

use eyre::Result;
use fluentgen_model::TypeDef;
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that expands every buildable with its substituted properties.
pub struct ExpandPhase;

impl Phase for ExpandPhase {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn description(&self) -> &'static str {
        "Substitute descendants for abstract property types"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let buildables: Vec<TypeDef> = ctx.session.buildables().iter().cloned().collect();

        for def in &buildables {
            let expanded = ctx.session.expand(def);
            debug!(
                fqn = %expanded.fully_qualified_name(),
                added = expanded.properties.len() - def.properties.len(),
                "expanded"
            );
            ctx.expanded.push(expanded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fluentgen_manifest::Manifest;
    use fluentgen_model::AttributeKey;

    use super::*;
    use crate::pipeline::phases::LowerPhase;

    #[test]
    fn test_expand_adds_substitutes() {
        let manifest: Manifest = r#"
            [[types]]
            name = "com.example.Shape"
            abstract = true
            buildable = true

            [[types]]
            name = "com.example.Circle"
            extends = "com.example.Shape"
            buildable = true

            [[types]]
            name = "com.example.Drawing"
            buildable = true

            [[types.properties]]
            name = "shapes"
            type = "java.util.List<com.example.Shape>"
        "#
        .parse()
        .unwrap();

        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).unwrap();
        ExpandPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.expanded.len(), 3);
        let drawing = &ctx.expanded[2];
        let names: Vec<_> = drawing.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["shapes", "circleShapes"]);
        assert_eq!(
            drawing.properties[1].attributes.text(AttributeKey::DescendantOf),
            Some("shapes")
        );
    }
}
