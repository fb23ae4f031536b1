//! Lint for references to undeclared types.

use std::collections::HashSet;

use fluentgen_manifest::{Manifest, TypeDecl, TypeExpr};

use super::super::Lint;
use crate::pipeline::Diagnostic;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Lint that warns about supertypes and property types that are neither
/// declared in the manifest nor part of the JDK.
///
/// Such references resolve to nothing: they never contribute descendants and
/// their properties are never substituted.
pub struct UnknownReferenceLint;

impl Lint for UnknownReferenceLint {
    fn name(&self) -> &'static str {
        "unknown-reference"
    }

    fn description(&self) -> &'static str {
        "Warn about references to undeclared types"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let declared: HashSet<&str> = manifest
            .types
            .iter()
            .map(|t| t.name.get_ref().as_str())
            .collect();

        for decl in &manifest.types {
            let fqn = decl.name.get_ref();
            let known = |name: &str| {
                declared.contains(name)
                    || name.starts_with("java.")
                    || PRIMITIVES.contains(&name)
                    || decl.parameters.iter().any(|p| p == name)
            };

            for supertype in decl.extends.iter().chain(&decl.implements) {
                if !known(supertype.as_str()) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("'{}' extends undeclared type '{}'", fqn, supertype),
                        )
                        .at(format!("types.{}", fqn)),
                    );
                }
            }

            for (property, name) in property_references(decl) {
                if !known(name.as_str()) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("property '{}' references undeclared type '{}'", property, name),
                        )
                        .at(format!("types.{}.{}", fqn, property)),
                    );
                }
            }
        }
    }
}

fn property_references(decl: &TypeDecl) -> Vec<(&str, String)> {
    let mut references = Vec::new();
    for property in &decl.properties {
        // Unparsable expressions are rejected before lints run.
        let Ok(expr) = TypeExpr::parse(property.type_expr.get_ref()) else {
            continue;
        };
        for name in expr.names() {
            references.push((property.name.get_ref().as_str(), name.to_string()));
        }
    }
    references
}
