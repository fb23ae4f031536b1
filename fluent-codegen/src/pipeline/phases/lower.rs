//! Lower phase - turns manifest declarations into type definitions.
//!
//! Every declared type is registered in the session: buildable ones in the
//! buildable repository, all of them as definitions for supertype lookups.

use eyre::{Result, WrapErr};
use fluentgen_manifest::{
    BuildableOptions, KindDecl, Manifest, PropertyDecl, TypeDecl, TypeExpr, WildcardBound,
};
use fluentgen_model::{
    AnnotationRef, AnnotationValue, AttributeKey, BoundKind, ClassRef, FILTER_DESCENDANTS,
    IGNORE_DESCENDANTS, Kind, PrimitiveRef, Property, TypeDef, TypeParamDef, TypeParamRef,
    TypeRef, WildcardRef,
};

use crate::pipeline::{CompilationContext, Phase};

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Phase that registers the manifest's types in the session.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Register declared types in the generation session"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for (def, buildable) in lower_manifest(&ctx.manifest)? {
            if buildable {
                ctx.session.register_buildable(def);
            } else {
                ctx.session.register_definition(def);
            }
        }
        Ok(())
    }
}

/// Lower every declaration, flagging the buildable ones.
fn lower_manifest(manifest: &Manifest) -> Result<Vec<(TypeDef, bool)>> {
    let mut lowered = Vec::with_capacity(manifest.types.len());
    for decl in &manifest.types {
        lowered.push((lower_type(decl, manifest.defaults)?, decl.is_buildable()));
    }
    Ok(lowered)
}

/// Lower one type declaration.
///
/// Builder options are resolved against `defaults` and stored as attributes.
pub fn lower_type(decl: &TypeDecl, defaults: BuildableOptions) -> Result<TypeDef> {
    let fqn = decl.name.get_ref();
    let mut def = TypeDef::new(lower_kind(decl.kind), fqn);
    def.modifiers.is_abstract = decl.is_abstract;
    def.extends = decl.extends.iter().map(|s| ClassRef::new(s.as_str())).collect();
    def.implements = decl
        .implements
        .iter()
        .map(|s| ClassRef::new(s.as_str()))
        .collect();
    def.parameters = decl
        .parameters
        .iter()
        .map(|p| TypeParamDef::new(p.as_str()))
        .collect();

    if let Some(options) = decl.buildable_options(defaults) {
        def.attributes.insert(AttributeKey::Buildable, true);
        def.attributes
            .insert(AttributeKey::ValidationEnabled, options.validation);
        def.attributes
            .insert(AttributeKey::EditableEnabled, options.editable);
        def.attributes
            .insert(AttributeKey::LazyCollectionsInitEnabled, options.lazy_collections);
        def.attributes
            .insert(AttributeKey::LazyMapInitEnabled, options.lazy_maps);
    }

    for property in &decl.properties {
        let property = lower_property(property, &decl.parameters)
            .wrap_err_with(|| format!("failed to lower '{}'", fqn))?;
        def = def.with_property(property);
    }
    Ok(def)
}

fn lower_kind(kind: KindDecl) -> Kind {
    match kind {
        KindDecl::Class => Kind::Class,
        KindDecl::Interface => Kind::Interface,
        KindDecl::Enum => Kind::Enum,
        KindDecl::Annotation => Kind::Annotation,
    }
}

fn lower_property(decl: &PropertyDecl, parameters: &[String]) -> Result<Property> {
    let name = decl.name.get_ref();
    let expr = TypeExpr::parse(decl.type_expr.get_ref())
        .wrap_err_with(|| format!("invalid type for property '{}'", name))?;

    let mut property = Property::new(name.as_str(), lower_type_expr(&expr, parameters));
    if decl.ignore_descendants {
        property = property.with_annotation(AnnotationRef::new(IGNORE_DESCENDANTS));
    }
    if let Some(pattern) = &decl.filter_descendants {
        property = property.with_annotation(
            AnnotationRef::new(FILTER_DESCENDANTS)
                .with_parameter("value", AnnotationValue::Str(pattern.get_ref().clone())),
        );
    }
    Ok(property)
}

/// Map a parsed type expression onto a type reference.
///
/// Primitive names become primitives, `void` becomes void, names listed in
/// `parameters` become type parameters, and everything else is a class.
pub fn lower_type_expr(expr: &TypeExpr, parameters: &[String]) -> TypeRef {
    match expr {
        TypeExpr::Named {
            name,
            arguments,
            dimensions,
        } => {
            if name == "void" && *dimensions == 0 {
                TypeRef::void()
            } else if PRIMITIVES.contains(&name.as_str()) {
                let mut primitive = PrimitiveRef::new(name.as_str());
                primitive.dimensions = *dimensions;
                primitive.into()
            } else if parameters.contains(name) && arguments.is_empty() {
                let mut param = TypeParamRef::new(name.as_str());
                param.dimensions = *dimensions;
                param.into()
            } else {
                ClassRef::new(name.as_str())
                    .with_arguments(arguments.iter().map(|a| lower_type_expr(a, parameters)))
                    .with_dimensions(*dimensions)
                    .into()
            }
        }
        TypeExpr::Wildcard { bound: None } => WildcardRef::default().into(),
        TypeExpr::Wildcard {
            bound: Some((bound, inner)),
        } => WildcardRef {
            bound_kind: match bound {
                WildcardBound::Extends => BoundKind::Extends,
                WildcardBound::Super => BoundKind::Super,
            },
            bounds: vec![lower_type_expr(inner, parameters)],
            ..WildcardRef::default()
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    fn lower(expr: &str, parameters: &[&str]) -> TypeRef {
        let parameters: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
        lower_type_expr(&TypeExpr::parse(expr).unwrap(), &parameters)
    }

    #[test]
    fn test_lower_type_expressions() {
        assert_eq!(lower("int", &[]), TypeRef::primitive("int"));
        assert_eq!(lower("void", &[]), TypeRef::void());
        assert_eq!(lower("T", &["T"]), TypeRef::type_param("T"));
        assert_eq!(lower("T", &[]), TypeRef::class("T"));

        let list = lower("java.util.List<? extends com.example.Shape>", &[]);
        assert_eq!(list.to_string(), "java.util.List<? extends com.example.Shape>");

        let matrix = lower("double[][]", &[]);
        assert_eq!(matrix.dimensions(), 2);
    }

    #[test]
    fn test_lower_type_declaration() {
        let manifest = parse_manifest(
            r#"
            [defaults]
            editable = true

            [[types]]
            name = "com.example.Drawing"
            implements = ["com.example.Printable"]
            parameters = ["T"]
            buildable = { lazy_collections = true }

            [[types.properties]]
            name = "shapes"
            type = "java.util.List<com.example.Shape>"
            filter_descendants = "com\\.example\\.C.*"

            [[types.properties]]
            name = "extra"
            type = "T"
            ignore_descendants = true
        "#,
        );

        let def = lower_type(&manifest.types[0], manifest.defaults).unwrap();
        assert_eq!(def.fully_qualified_name(), "com.example.Drawing");
        assert_eq!(def.implements[0].fully_qualified_name, "com.example.Printable");
        assert_eq!(def.parameters[0].name, "T");
        assert!(def.attributes.flag(AttributeKey::Buildable));
        assert!(def.attributes.flag(AttributeKey::EditableEnabled));
        assert!(def.attributes.flag(AttributeKey::LazyCollectionsInitEnabled));
        assert!(!def.attributes.flag(AttributeKey::ValidationEnabled));

        let shapes = &def.properties[0];
        assert_eq!(
            shapes.origin.as_ref().map(|o| o.name.as_str()),
            Some("Drawing")
        );
        let filter = shapes.annotation(FILTER_DESCENDANTS).unwrap();
        assert_eq!(
            filter.parameters.get("value"),
            Some(&AnnotationValue::Str("com\\.example\\.C.*".to_string()))
        );

        let extra = &def.properties[1];
        assert_eq!(extra.type_ref, TypeRef::type_param("T"));
        assert!(extra.annotation(IGNORE_DESCENDANTS).is_some());
    }

    #[test]
    fn test_lower_phase_registers_types() {
        let manifest = parse_manifest(
            r#"
            [[types]]
            name = "com.example.Shape"
            buildable = true

            [[types]]
            name = "com.example.Canvas"
        "#,
        );

        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.session.buildables().len(), 1);
        assert_eq!(ctx.session.definitions().len(), 2);
        assert!(
            !ctx.session
                .definitions()
                .get("com.example.Canvas")
                .unwrap()
                .attributes
                .contains(AttributeKey::Buildable)
        );
    }
}
