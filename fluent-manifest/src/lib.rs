// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod type_expr;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    Buildable, BuildableOptions, BuildableOverrides, FluentToml, GeneratorConfig, KindDecl,
    Manifest, ParseContext, PropertyDecl, TypeDecl,
};
pub use type_expr::{TypeExpr, TypeExprError, WildcardBound};
