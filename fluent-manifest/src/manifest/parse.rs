//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{
    Manifest,
    validate::{ParseContext, string_span},
};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "fluent.toml")
    }
}

impl Manifest {
    /// Parse a fluent.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a fluent.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if manifest.generator.max_recursion_level == 0 {
        return Err(ctx.source_context().validation_error(
            "max_recursion_level must be at least 1",
            None,
        ));
    }

    for decl in &manifest.types {
        let name = decl.name.get_ref();
        ctx.validate_type_name(name, Some(string_span(decl.name.span())))?;

        let type_ctx = ctx.push(name);
        for supertype in decl.extends.iter().chain(&decl.implements) {
            type_ctx.validate_type_name(supertype, None)?;
        }
        for parameter in &decl.parameters {
            type_ctx.validate_name(parameter, "type parameter", None)?;
        }

        let mut seen = HashSet::new();
        for property in &decl.properties {
            let property_name = property.name.get_ref();
            let span = Some(string_span(property.name.span()));
            type_ctx.validate_name(property_name, "property", span)?;

            if !seen.insert(property_name.as_str()) {
                return Err(type_ctx.source_context().validation_error(
                    format!("duplicate property '{}' in '{}'", property_name, name),
                    span,
                ));
            }

            type_ctx.validate_type_expr(&property.type_expr)?;
            if let Some(pattern) = &property.filter_descendants {
                type_ctx.validate_pattern(pattern)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KindDecl, TypeExpr};

    const SHAPES: &str = r#"
[generator]
max_recursion_level = 3

[defaults]
editable = true

[[types]]
name = "com.example.Shape"
abstract = true
buildable = true

[[types]]
name = "com.example.Circle"
extends = "com.example.Shape"
buildable = { validation = true }

[[types.properties]]
name = "radius"
type = "double"

[[types]]
name = "com.example.Drawing"
buildable = true

[[types.properties]]
name = "shapes"
type = "java.util.List<com.example.Shape>"
filter_descendants = "com\\.example\\.C.*"
"#;

    #[test]
    fn test_parse_shapes() {
        let manifest: Manifest = SHAPES.parse().unwrap();

        assert_eq!(manifest.generator.max_recursion_level, 3);
        assert_eq!(manifest.generator.max_nesting_depth, 2);
        assert_eq!(manifest.types.len(), 3);

        let shape = manifest.get("com.example.Shape").unwrap();
        assert_eq!(shape.kind, KindDecl::Class);
        assert!(shape.is_abstract);

        let circle = manifest.get("com.example.Circle").unwrap();
        assert_eq!(circle.extends, ["com.example.Shape"]);
        let options = circle.buildable_options(manifest.defaults).unwrap();
        assert!(options.validation);
        assert!(options.editable);

        let drawing = manifest.get("com.example.Drawing").unwrap();
        let shapes = &drawing.properties[0];
        assert_eq!(
            TypeExpr::parse(shapes.type_expr.get_ref()).unwrap().to_string(),
            "java.util.List<com.example.Shape>"
        );
        assert_eq!(
            shapes.filter_descendants.as_ref().map(|p| p.get_ref().as_str()),
            Some("com\\.example\\.C.*")
        );
    }

    #[test]
    fn test_buildable_defaults_to_false() {
        let manifest: Manifest = r#"
[[types]]
name = "java.util.List"
kind = "interface"
parameters = ["E"]
"#
        .parse()
        .unwrap();

        let list = &manifest.types[0];
        assert!(!list.is_buildable());
        assert_eq!(list.buildable_options(manifest.defaults), None);
        assert_eq!(manifest.buildables().count(), 0);
    }

    #[test]
    fn test_invalid_type_expression() {
        let err = r#"
[[types]]
name = "com.example.Drawing"

[[types.properties]]
name = "shapes"
type = "java.util.List<Shape"
"#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidType { .. }));
    }

    #[test]
    fn test_invalid_filter_pattern() {
        let err = r#"
[[types]]
name = "com.example.Drawing"

[[types.properties]]
name = "shapes"
type = "java.util.List<com.example.Shape>"
filter_descendants = "com.example.(Circle"
"#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_reserved_property_name() {
        let err = r#"
[[types]]
name = "com.example.Drawing"

[[types.properties]]
name = "class"
type = "java.lang.String"
"#
        .parse::<Manifest>()
        .unwrap_err();

        match *err {
            Error::ReservedKeyword { name, context, .. } => {
                assert_eq!(name, "class");
                assert_eq!(context, "property in 'com.example.Drawing'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_property() {
        let err = r#"
[[types]]
name = "com.example.Drawing"

[[types.properties]]
name = "title"
type = "java.lang.String"

[[types.properties]]
name = "title"
type = "java.lang.String"
"#
        .parse::<Manifest>()
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "duplicate property 'title' in 'com.example.Drawing'"
        );
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let err = r#"
[[types]]
name = "com.example.Drawing"
colour = "red"
"#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_zero_recursion_level_rejected() {
        let err = "[generator]\nmax_recursion_level = 0\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }
}
