//! Contract operation - builder shape generation.

use std::path::PathBuf;

use eyre::{Context, Result, bail};
use fluentgen_codegen::pipeline::{Pipeline, SnapshotPlugin};
use fluentgen_manifest::Manifest;
use tracing::debug;

use crate::reports::ContractReport;

/// Options for the contract operation.
#[derive(Debug, Clone, Default)]
pub struct ContractOptions {
    /// Keep only the contract of this type.
    pub type_name: Option<String>,
    /// Directory receiving one JSON snapshot per phase.
    pub snapshots: Option<PathBuf>,
}

/// Execute the contract operation.
pub fn contract(manifest: &Manifest, options: &ContractOptions) -> Result<ContractReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = &options.snapshots {
        debug!(dir = %dir.display(), "writing phase snapshots");
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let mut ctx = pipeline
        .run(manifest.clone())
        .wrap_err("Builder generation failed")?;
    let warnings = ctx.warning_count();
    let mut shapes = ctx.take_shapes();

    if let Some(name) = &options.type_name {
        shapes.retain(|shape| &shape.type_name == name);
        if shapes.is_empty() {
            bail!("no buildable type named '{}'", name);
        }
    }

    Ok(ContractReport { shapes, warnings })
}
