//! Compilation context passed through pipeline phases.

use fluentgen_manifest::Manifest;
use fluentgen_model::TypeDef;

use super::diagnostic::{Diagnostic, Severity};
use crate::{BuilderContext, BuilderShape, Resolution};

/// Context passed through all pipeline phases.
///
/// Owns the generation session, so every phase sees the same repositories
/// and descendant cache.
#[derive(Debug)]
pub struct CompilationContext {
    /// The manifest being compiled.
    pub manifest: Manifest,
    /// Repositories and resolver cache (populated by LowerPhase).
    pub session: BuilderContext,
    /// One resolution per buildable type (populated by ResolvePhase).
    pub resolutions: Vec<Resolution>,
    /// Buildable types with substituted properties (populated by ExpandPhase).
    pub expanded: Vec<TypeDef>,
    /// Builder contracts in registration order (populated by ShapePhase).
    pub shapes: Vec<BuilderShape>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from a manifest.
    ///
    /// Resolver limits come from the manifest's `[generator]` table.
    pub fn new(manifest: Manifest) -> Self {
        let session = BuilderContext::new(manifest.generator.into());
        Self {
            manifest,
            session,
            resolutions: Vec::new(),
            expanded: Vec::new(),
            shapes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Info))
    }

    /// Find the resolution rooted at a type.
    pub fn resolution(&self, fqn: &str) -> Option<&Resolution> {
        self.resolutions.iter().find(|r| r.root == fqn)
    }

    /// Find the builder contract of a type.
    pub fn shape(&self, fqn: &str) -> Option<&BuilderShape> {
        self.shapes.iter().find(|s| s.type_name == fqn)
    }

    /// Take the builder contracts out of the context.
    pub fn take_shapes(&mut self) -> Vec<BuilderShape> {
        std::mem::take(&mut self.shapes)
    }
}
