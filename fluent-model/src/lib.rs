//! Type model for fluent builder generation.
//!
//! This crate provides the model shared across the fluentgen pipeline:
//! use-site type references, type definitions with their properties and
//! methods, the attribute bag, and hand-written fluent builders for the
//! model itself.
//!
//! # Architecture
//!
//! ```text
//! fluent.toml → fluent-manifest (parsing) → fluent-model (types) → fluent-codegen (shapes)
//! ```

mod assign;
mod attrs;
mod builder;
mod def;
mod types;

pub use assign::TypeLookup;
pub use attrs::{AttributeKey, AttributeValue, Attributes};
pub use builder::{
    AnnotationRefBuilder, Builder, BuilderError, ClassRefBuilder, MethodBuilder, Nested,
    PrimitiveRefBuilder, PropertyBuilder, TypeParamRefBuilder, VoidRefBuilder, WildcardRefBuilder,
};
pub use def::{
    AnnotationRef, AnnotationValue, FILTER_DESCENDANTS, IGNORE_DESCENDANTS, Kind, Method,
    Modifiers, Property, TypeDef, TypeName, TypeParamDef,
};
pub use types::{
    BoundKind, ClassRef, OBJECT, PrimitiveRef, TypeParamRef, TypeRef, TypeRefVariant, VoidRef,
    WildcardRef, split_qualified_name,
};
