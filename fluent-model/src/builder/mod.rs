//! Fluent builders for the model types.
//!
//! Builders are owned values: every operation consumes the builder and
//! returns it. Nested builders are opened with `with_new_*`, `add_new_*` or
//! `edit_*` and folded back with [`Nested::and`].
//!
//! ```
//! use fluentgen_model::{Builder, MethodBuilder, TypeRef, VoidRef};
//!
//! let method = MethodBuilder::default()
//!     .with_name("draw")
//!     .with_void_ref_return_type(VoidRef::default())
//!     .add_new_argument()
//!     .edit(|p| p.with_name("scale").with_type_ref(TypeRef::primitive("double")))
//!     .and()?
//!     .build()?;
//!
//! assert_eq!(method.arguments[0].name, "scale");
//! # Ok::<(), fluentgen_model::BuilderError>(())
//! ```

#[macro_use]
mod macros;

mod error;
mod method;
mod nested;
mod property;
mod refs;

pub use error::BuilderError;
pub use method::MethodBuilder;
pub use nested::Nested;
pub use property::PropertyBuilder;
pub use refs::{
    AnnotationRefBuilder, ClassRefBuilder, PrimitiveRefBuilder, TypeParamRefBuilder,
    VoidRefBuilder, WildcardRefBuilder,
};

/// A builder producing a value of type `Output`.
pub trait Builder {
    type Output;

    /// Build the value, failing when a required field is unset.
    fn build(&self) -> Result<Self::Output, BuilderError>;
}
