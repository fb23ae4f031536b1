//! Compilation pipeline from manifest to builder shapes.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the phases
//! between a parsed manifest and the builder contracts:
//!
//! - Explicit phase boundaries (validate → lower → resolve → expand → shape)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - One shared generation session via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use fluentgen_codegen::pipeline::{Pipeline, Severity};
//!
//! let ctx = Pipeline::new().run(manifest)?;
//!
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("warning: {}", diag.message);
//!     }
//! }
//!
//! for shape in &ctx.shapes {
//!     println!("{shape}");
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
