//! Check operation - manifest validation and resolution summary.

use std::path::Path;

use eyre::{Context, Result};
use fluentgen_codegen::pipeline::{
    CompilationContext, Diagnostic, Phase, Pipeline, Severity, phases::ValidatePhase,
};
use fluentgen_manifest::Manifest;

use crate::reports::{BuildableSummary, CheckReport};

/// Execute the check operation.
///
/// Validation diagnostics are always reported. The buildable summary is only
/// filled in when validation passes.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let mut validation = CompilationContext::new(manifest.clone());
    if ValidatePhase::new().run(&mut validation).is_err() {
        return Ok(report(config_path, &validation.diagnostics, Vec::new()));
    }

    let ctx = Pipeline::new()
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;

    let buildables = ctx
        .resolutions
        .iter()
        .map(|resolution| BuildableSummary {
            fqn: resolution.root.clone(),
            descendants: resolution
                .descendants_of(&resolution.root)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            nested: resolution.descendants.len().saturating_sub(1),
            truncated: resolution.truncated.len(),
        })
        .collect();

    Ok(report(config_path, &ctx.diagnostics, buildables))
}

fn report(
    config_path: &Path,
    diagnostics: &[Diagnostic],
    buildables: Vec<BuildableSummary>,
) -> CheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        errors,
        warnings,
        infos,
        buildables,
    }
}
