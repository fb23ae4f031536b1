//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the manifest
//! - [`LowerPhase`] - registers declared types in the session
//! - [`ResolvePhase`] - resolves descendants from every buildable type
//! - [`ExpandPhase`] - adds substituted descendant properties
//! - [`ShapePhase`] - derives builder contracts

mod expand;
mod lower;
mod resolve;
mod shape;
mod validate;

pub use expand::ExpandPhase;
pub use lower::{LowerPhase, lower_type, lower_type_expr};
pub use resolve::ResolvePhase;
pub use shape::ShapePhase;
pub use validate::{
    DuplicateTypeLint, Lint, LintInfo, TypeNamingLint, UnknownReferenceLint, ValidatePhase,
};
