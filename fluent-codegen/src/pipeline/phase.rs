//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the compilation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads and
/// extends the compilation context: the session, the resolutions, the
/// expanded definitions, the builder shapes or the diagnostics.
///
/// Built-in phases:
/// - `ValidatePhase` - runs lints over the manifest
/// - `LowerPhase` - registers the declared types in the session
/// - `ResolvePhase` - resolves descendants from every buildable type
/// - `ExpandPhase` - adds substituted properties
/// - `ShapePhase` - derives builder contracts
///
/// Custom phases run after the built-in ones, e.g. an emitter that renders
/// the shapes.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
