//! Core operations.
//!
//! This module contains the business logic for fluent commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod contract;

pub use check::check;
pub use contract::{ContractOptions, contract};

#[cfg(test)]
pub(crate) mod testing {
    use std::{fs, path::PathBuf};

    use fluentgen_manifest::FluentToml;
    use tempfile::TempDir;

    pub const SHAPES: &str = r#"
[[types]]
name = "com.example.Shape"
abstract = true
buildable = true

[[types]]
name = "com.example.Circle"
extends = "com.example.Shape"
buildable = true

[[types]]
name = "com.example.Drawing"
buildable = true

[[types.properties]]
name = "shapes"
type = "java.util.List<com.example.Shape>"
"#;

    /// Write `content` to a fluent.toml in a fresh directory and open it.
    pub fn open_manifest(content: &str) -> (TempDir, PathBuf, FluentToml) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fluent.toml");
        fs::write(&path, content).unwrap();
        let fluent_toml = FluentToml::open(&path).unwrap();
        (dir, path, fluent_toml)
    }
}
