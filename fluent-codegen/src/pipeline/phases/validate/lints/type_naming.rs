//! Lint for type naming conventions.

use fluentgen_manifest::Manifest;
use fluentgen_model::split_qualified_name;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about type names that don't follow Java conventions.
///
/// Simple names are UpperCamelCase (`Circle`, `ShapeList`), package
/// segments are lowercase (`com.example`).
pub struct TypeNamingLint;

impl Lint for TypeNamingLint {
    fn name(&self) -> &'static str {
        "type-naming"
    }

    fn description(&self) -> &'static str {
        "Check type names follow UpperCamelCase and lowercase packages"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for decl in &manifest.types {
            let fqn = decl.name.get_ref();
            let (package, name) = split_qualified_name(fqn);

            if !is_upper_camel_case(name) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "type '{}' should use UpperCamelCase (e.g., 'ShapeList' not 'shape_list')",
                            name
                        ),
                    )
                    .at(format!("types.{}", fqn)),
                );
            }

            if package.split('.').any(|segment| segment.chars().any(char::is_uppercase)) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("package '{}' should be lowercase", package),
                    )
                    .at(format!("types.{}", fqn)),
                );
            }
        }
    }
}

fn is_upper_camel_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '$')
}
