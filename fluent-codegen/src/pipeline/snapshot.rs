//! Pipeline snapshot plugin for debugging.
//!
//! Captures what each phase produced so the intermediate state of a run
//! can be inspected as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard},
};

use eyre::{Result, WrapErr};
use fluentgen_model::TypeDef;
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::{BuilderShape, Resolution};

/// The pipeline state right after a phase completed.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    pub phase: String,

    /// Registered buildable types (available after "lower").
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buildables: Vec<TypeDef>,

    /// Available after "resolve".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resolutions: Vec<Resolution>,

    /// Available after "expand".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expanded: Vec<TypeDef>,

    /// Available after "shape".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<BuilderShape>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir("target/fluent"));
/// let ctx = pipeline.run(manifest)?;
/// // target/fluent/{validate,lower,resolve,expand,shape}.json
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Snapshots are written here as each phase completes.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes `{phase}.json` into a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.read().clone()
    }

    /// Write all collected snapshots into `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for snapshot in self.read().iter() {
            write_snapshot(dir, snapshot)?;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<PhaseSnapshot>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            buildables: ctx.session.buildables().iter().cloned().collect(),
            resolutions: ctx.resolutions.clone(),
            expanded: ctx.expanded.clone(),
            shapes: ctx.shapes.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
        snapshot
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx);
        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }
        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
