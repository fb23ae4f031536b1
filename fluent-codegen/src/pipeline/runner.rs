//! Pipeline orchestrator.

use eyre::{Result, WrapErr};
use fluentgen_manifest::Manifest;
use tracing::debug;

use super::{
    CompilationContext, Phase, Plugin,
    phase::PhaseInfo,
    phases::{ExpandPhase, LowerPhase, ResolvePhase, ShapePhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (validate, lower, resolve, expand, shape)
/// followed by any user phases, calling plugin hooks before and after each
/// phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir("target/fluent"))
///     .phase(MyEmitterPhase);
///
/// let ctx = pipeline.run(manifest)?;
/// for shape in &ctx.shapes {
///     println!("{shape}");
/// }
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline that runs only the built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Describe every phase the pipeline will run, in order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Run the pipeline on a manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if validation reports errors, if a phase fails
    /// fatally, or if a plugin aborts.
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);

        for phase in builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let info = phase.info();
        debug!(phase = info.name, description = info.description, "running phase");

        for plugin in &self.plugins {
            plugin
                .on_before_phase(info.name, ctx)
                .wrap_err_with(|| format!("plugin '{}' failed", plugin.name()))?;
        }

        phase
            .run(ctx)
            .wrap_err_with(|| format!("phase '{}' failed", info.name))?;

        for plugin in &self.plugins {
            plugin
                .on_after_phase(info.name, ctx)
                .wrap_err_with(|| format!("plugin '{}' failed", plugin.name()))?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(ValidatePhase::new()),
        Box::new(LowerPhase),
        Box::new(ResolvePhase),
        Box::new(ExpandPhase),
        Box::new(ShapePhase),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    const SHAPES: &str = r#"
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
"#;

    fn make_test_manifest() -> Manifest {
        SHAPES.parse().expect("Failed to parse test manifest")
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .run(make_test_manifest())
            .expect("pipeline should succeed");

        assert_eq!(ctx.session.buildables().len(), 3);
        assert_eq!(ctx.resolutions.len(), 3);
        assert_eq!(ctx.expanded.len(), 3);
        assert_eq!(ctx.shapes.len(), 3);
        assert!(ctx.shape("com.example.Drawing").is_some());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(make_test_manifest())
            .expect("pipeline should succeed");

        // 5 built-in phases = 5 before + 5 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 5);
        assert_eq!(after_count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_phase_listing() {
        let names: Vec<_> = Pipeline::new().phases().iter().map(|p| p.name).collect();
        assert_eq!(names, ["validate", "lower", "resolve", "expand", "shape"]);
    }

    #[test]
    fn test_validation_errors_stop_pipeline() {
        let manifest: Manifest = r#"
[[types]]
name = "com.example.Shape"

[[types]]
name = "com.example.Shape"
"#
        .parse()
        .expect("Failed to parse test manifest");

        let err = Pipeline::new().run(manifest).unwrap_err();
        assert_eq!(err.to_string(), "phase 'validate' failed");
    }
}
