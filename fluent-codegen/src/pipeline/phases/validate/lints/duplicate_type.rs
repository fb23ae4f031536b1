//! Lint for duplicate type detection.

use std::collections::HashMap;

use fluentgen_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on types declared more than once.
///
/// A later declaration would silently replace the earlier one in the
/// repositories.
pub struct DuplicateTypeLint;

impl Lint for DuplicateTypeLint {
    fn name(&self) -> &'static str {
        "duplicate-type"
    }

    fn description(&self) -> &'static str {
        "Detect types declared more than once"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for (index, decl) in manifest.types.iter().enumerate() {
            let name = decl.name.get_ref().as_str();
            if let Some(first) = seen.get(name) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "duplicate type '{}' (first declared as type #{})",
                            name,
                            first + 1
                        ),
                    )
                    .at(format!("types.{}", name)),
                );
            } else {
                seen.insert(name, index);
            }
        }
    }
}
