//! Descendant resolution and builder shape generation for fluentgen.
//!
//! Given the types declared in a `fluent.toml`, this crate works out which
//! concrete buildable classes can stand in for each abstract or interface
//! property type, adds a synthetic property per substitute, and derives the
//! operation contract of every generated builder.
//!
//! # Module Organization
//!
//! - [`BuilderContext`] - the generation session: repositories, resolver
//!   limits and the descendant cache
//! - [`Resolution`] - result of walking the nested-builder graph of one root
//! - [`BuilderShape`] - operation contract of one builder
//! - [`pipeline`] - phases and plugins that drive a manifest end to end
//!
//! # Example
//!
//! ```ignore
//! use fluentgen_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//! for shape in &ctx.shapes {
//!     println!("{shape}");
//! }
//! ```

mod containers;
pub mod pipeline;
mod repository;
mod resolver;
mod session;
mod shape;
mod substitution;

pub use containers::ContainerKind;
pub use repository::{BuildableRepository, DefinitionRepository};
pub use resolver::{Resolution, Truncation, TruncationReason};
pub use session::{BuilderContext, ResolverSettings};
pub use shape::{BuilderShape, ContractKind, Failure, Operation, PropertyContract, Variant};
