//! Core utilities for the fluentgen builder generator.
//!
//! This crate provides the naming helpers used to derive builder operation
//! and synthetic property names.

mod utils;

// String utilities
pub use utils::{capitalize, compact, decapitalize_first, singularize, split_camel_case};
