//! Built-in lints for manifest validation.

mod duplicate_type;
mod type_naming;
mod unknown_reference;

pub use duplicate_type::DuplicateTypeLint;
pub use type_naming::TypeNamingLint;
pub use unknown_reference::UnknownReferenceLint;
