//! Resolve phase - walks the nested-builder graph of every buildable type.

use eyre::Result;
use fluentgen_model::TypeDef;

use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that resolves descendants and nested builders per buildable.
///
/// Truncated branches are not errors; each one is reported as an info
/// diagnostic located at the root type.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve descendants and nested builders"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let roots: Vec<TypeDef> = ctx.session.buildables().iter().cloned().collect();

        for root in &roots {
            let resolution = ctx.session.resolve(root);
            for truncation in &resolution.truncated {
                ctx.add_diagnostic(
                    Diagnostic::info(
                        "resolve",
                        format!(
                            "stopped at '{}' (depth {}, {} limit reached)",
                            truncation.fqn, truncation.depth, truncation.reason
                        ),
                    )
                    .at(format!("types.{}", resolution.root)),
                );
            }
            ctx.resolutions.push(resolution);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fluentgen_manifest::Manifest;

    use super::*;
    use crate::pipeline::phases::LowerPhase;

    fn resolve(content: &str) -> CompilationContext {
        let manifest: Manifest = content.parse().expect("Failed to parse test manifest");
        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).unwrap();
        ResolvePhase.run(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_resolution_per_buildable() {
        let ctx = resolve(
            r#"
            [[types]]
            name = "com.example.Shape"
            abstract = true
            buildable = true

            [[types]]
            name = "com.example.Circle"
            extends = "com.example.Shape"
            buildable = true
        "#,
        );

        assert_eq!(ctx.resolutions.len(), 2);
        let shape = ctx.resolution("com.example.Shape").unwrap();
        assert_eq!(
            shape.descendants_of("com.example.Shape"),
            Some(&["com.example.Circle".to_string()][..])
        );
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_truncation_reported_as_info() {
        let ctx = resolve(
            r#"
            [generator]
            max_nesting_depth = 1

            [[types]]
            name = "com.example.A"
            buildable = true

            [[types.properties]]
            name = "b"
            type = "com.example.B"

            [[types]]
            name = "com.example.B"
            buildable = true

            [[types.properties]]
            name = "c"
            type = "com.example.C"

            [[types]]
            name = "com.example.C"
            buildable = true
        "#,
        );

        let a = ctx.resolution("com.example.A").unwrap();
        assert!(a.is_truncated());

        let infos: Vec<_> = ctx.infos().collect();
        assert_eq!(infos.len(), 1);
        assert_eq!(
            infos[0].message,
            "stopped at 'com.example.C' (depth 2, nesting depth limit reached)"
        );
        assert_eq!(infos[0].location.as_deref(), Some("types.com.example.A"));
        assert!(!ctx.has_errors());
    }
}
