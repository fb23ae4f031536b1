//! Property substitution.
//!
//! A property whose type (or element type, or map value type) has buildable
//! descendants gets one synthetic sibling per descendant, narrowed to that
//! descendant. Synthetic properties are named
//! `compact(lower_first(Descendant) + Property)` and remember the property
//! they narrow through [`AttributeKey::DescendantOf`].

use fluentgen_core::{capitalize, compact, decapitalize_first};
use fluentgen_model::{
    AnnotationValue, AttributeKey, FILTER_DESCENDANTS, IGNORE_DESCENDANTS, Property, TypeDef,
    TypeRef,
};
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    BuilderContext,
    containers::{self, ContainerKind},
};

/// Decides which descendants a property may be substituted with.
enum DescendantFilter {
    All,
    Matching(Regex),
    None,
}

impl DescendantFilter {
    fn of(property: &Property) -> Self {
        let Some(annotation) = property.annotation(FILTER_DESCENDANTS) else {
            return DescendantFilter::All;
        };
        let Some(AnnotationValue::Str(pattern)) = annotation.parameters.get("value") else {
            return DescendantFilter::None;
        };
        match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(regex) => DescendantFilter::Matching(regex),
            Err(e) => {
                warn!(property = %property.name, error = %e, "unusable descendant filter");
                DescendantFilter::None
            }
        }
    }

    fn accepts(&self, fqn: &str) -> bool {
        match self {
            DescendantFilter::All => true,
            DescendantFilter::Matching(regex) => regex.is_match(fqn),
            DescendantFilter::None => false,
        }
    }
}

impl BuilderContext {
    /// Synthetic descendant properties for `property`, never including the
    /// property itself.
    pub fn substituted_properties_of(&mut self, property: &Property) -> Vec<Property> {
        if property.annotation(IGNORE_DESCENDANTS).is_some() {
            return Vec::new();
        }

        let kind = ContainerKind::of(&property.type_ref, self.definitions());
        let Some(candidate) = containers::unwrap(&property.type_ref, kind) else {
            return Vec::new();
        };
        let Some(candidate) = self.definitions().get(&candidate.fully_qualified_name).cloned()
        else {
            debug!(
                property = %property.name,
                fqn = %candidate.fully_qualified_name,
                "unresolved reference, no substitution"
            );
            return Vec::new();
        };

        let filter = DescendantFilter::of(property);
        let mut result = Vec::new();
        for descendant in self.descendants_of(&candidate) {
            let fqn = descendant.fully_qualified_name();
            if !filter.accepts(&fqn) {
                continue;
            }
            if let Some(origin) = &property.origin
                && origin.name == descendant.name
                && origin.package != descendant.package
            {
                debug!(property = %property.name, fqn = %fqn, "skipped same-name descendant");
                continue;
            }

            let Some(type_ref) = narrow(&property.type_ref, kind, &descendant) else {
                continue;
            };
            let name = compact(&format!(
                "{}{}",
                decapitalize_first(&descendant.name),
                capitalize(&property.name)
            ));

            let mut synthetic = property.clone();
            synthetic.name = name;
            synthetic.type_ref = type_ref;
            synthetic.attributes.remove(AttributeKey::Init);
            synthetic
                .attributes
                .insert(AttributeKey::DescendantOf, property.name.as_str());
            synthetic
                .attributes
                .insert(AttributeKey::BuildableEnabled, true);
            result.push(self.enrich_init(synthetic));
        }
        result
    }

    /// `def` with each property followed by its substituted properties.
    pub fn expand(&mut self, def: &TypeDef) -> TypeDef {
        let mut expanded = def.clone();
        expanded.properties = Vec::with_capacity(def.properties.len());
        for property in &def.properties {
            expanded.properties.push(self.enrich_init(property.clone()));
            let substitutes = self.substituted_properties_of(property);
            expanded.properties.extend(substitutes);
        }
        expanded
    }

    /// Record the concrete container a sequence or map property starts
    /// with, unless its declaring type asks for lazy initialization.
    pub fn enrich_init(&self, mut property: Property) -> Property {
        let kind = ContainerKind::of(&property.type_ref, self.definitions());
        let Some(class_ref) = property.type_ref.as_class() else {
            return property;
        };
        let Some(init) = containers::default_init(class_ref, kind) else {
            return property;
        };

        let lazy_key = match kind {
            ContainerKind::Map => AttributeKey::LazyMapInitEnabled,
            _ => AttributeKey::LazyCollectionsInitEnabled,
        };
        let owner_is_lazy = property
            .origin
            .as_ref()
            .and_then(|origin| self.definitions().get(&origin.fully_qualified_name()))
            .is_some_and(|owner| owner.attributes.flag(lazy_key));

        if owner_is_lazy || property.attributes.flag(lazy_key) {
            property.attributes.remove(AttributeKey::Init);
        } else {
            property.attributes.insert(AttributeKey::Init, init);
        }
        property
    }
}

/// The property type with the nested reference replaced by `descendant`.
fn narrow(type_ref: &TypeRef, kind: ContainerKind, descendant: &TypeDef) -> Option<TypeRef> {
    let reference = descendant.to_reference();
    match kind {
        ContainerKind::Single => Some(reference.into()),
        ContainerKind::Sequence => {
            let container = type_ref.as_class()?.clone();
            Some(container.with_arguments([reference.into()]).into())
        }
        ContainerKind::Map => {
            let container = type_ref.as_class()?.clone();
            let key = container.arguments.first()?.clone();
            Some(container.with_arguments([key, reference.into()]).into())
        }
        ContainerKind::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use fluentgen_model::{AnnotationRef, ClassRef, Kind, TypeName};

    use super::*;

    fn class(fqn: &str) -> TypeDef {
        TypeDef::new(Kind::Class, fqn)
    }

    fn list_of(fqn: &str) -> ClassRef {
        ClassRef::new("java.util.List").with_arguments([TypeRef::class(fqn)])
    }

    fn shapes() -> BuilderContext {
        let mut ctx = BuilderContext::default();
        ctx.register_buildable(class("com.example.Shape").with_abstract());
        ctx.register_buildable(class("com.example.Circle").extending("com.example.Shape"));
        ctx.register_buildable(class("com.example.Square").extending("com.example.Shape"));
        ctx
    }

    fn drawing_property(name: &str, type_ref: impl Into<TypeRef>) -> Property {
        Property::new(name, type_ref).with_origin(TypeName::from_fqn("com.example.Drawing"))
    }

    #[test]
    fn test_sequence_substitution() {
        let mut ctx = shapes();
        let shapes = drawing_property("shapes", list_of("com.example.Shape"));

        let result = ctx.substituted_properties_of(&shapes);
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["circleShapes", "squareShapes"]);

        assert_eq!(
            result[0].type_ref.to_string(),
            "java.util.List<com.example.Circle>"
        );
        for p in &result {
            assert_eq!(p.descendant_of(), Some("shapes"));
            assert!(p.attributes.flag(AttributeKey::BuildableEnabled));
            assert_eq!(
                p.attributes.text(AttributeKey::Init),
                Some("java.util.ArrayList")
            );
            assert_ne!(p, &shapes);
        }
    }

    #[test]
    fn test_map_substitution_keeps_key() {
        let mut ctx = shapes();
        let layers = drawing_property(
            "layers",
            ClassRef::new("java.util.Map").with_arguments([
                TypeRef::class("java.lang.String"),
                TypeRef::class("com.example.Shape"),
            ]),
        );

        let result = ctx.substituted_properties_of(&layers);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].name, "squareLayers");
        assert_eq!(
            result[1].type_ref.to_string(),
            "java.util.Map<java.lang.String, com.example.Square>"
        );
        assert_eq!(
            result[1].attributes.text(AttributeKey::Init),
            Some("java.util.LinkedHashMap")
        );
    }

    #[test]
    fn test_single_substitution() {
        let mut ctx = shapes();
        let main = drawing_property("main", TypeRef::class("com.example.Shape"));

        let result = ctx.substituted_properties_of(&main);
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["circleMain", "squareMain"]);
        assert_eq!(result[0].type_ref, TypeRef::class("com.example.Circle"));
        assert!(!result[0].attributes.contains(AttributeKey::Init));
    }

    #[test]
    fn test_ignore_annotation() {
        let mut ctx = shapes();
        let shapes = drawing_property("shapes", list_of("com.example.Shape"))
            .with_annotation(AnnotationRef::new(IGNORE_DESCENDANTS));
        assert!(ctx.substituted_properties_of(&shapes).is_empty());
    }

    #[test]
    fn test_filter_narrows() {
        let mut ctx = shapes();
        let shapes = drawing_property("shapes", list_of("com.example.Shape")).with_annotation(
            AnnotationRef::new(FILTER_DESCENDANTS)
                .with_parameter("value", AnnotationValue::Str("com\\.example\\.C.*".into())),
        );

        let result = ctx.substituted_properties_of(&shapes);
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["circleShapes"]);
    }

    #[test]
    fn test_filter_must_match_fully() {
        let mut ctx = shapes();
        let shapes = drawing_property("shapes", list_of("com.example.Shape")).with_annotation(
            AnnotationRef::new(FILTER_DESCENDANTS)
                .with_parameter("value", AnnotationValue::Str("Circle".into())),
        );
        assert!(ctx.substituted_properties_of(&shapes).is_empty());
    }

    #[test]
    fn test_filter_without_pattern_denies_all() {
        let mut ctx = shapes();
        let shapes = drawing_property("shapes", list_of("com.example.Shape")).with_annotation(
            AnnotationRef::new(FILTER_DESCENDANTS).with_parameter("value", AnnotationValue::Int(1)),
        );
        assert!(ctx.substituted_properties_of(&shapes).is_empty());
    }

    #[test]
    fn test_same_name_other_package_excluded() {
        let mut ctx = shapes();
        ctx.register_buildable(class("com.other.Drawing").extending("com.example.Shape"));

        let shapes = drawing_property("shapes", list_of("com.example.Shape"));
        let names: Vec<_> = ctx
            .substituted_properties_of(&shapes)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["circleShapes", "squareShapes"]);
    }

    #[test]
    fn test_no_substitution_for_other_shapes() {
        let mut ctx = shapes();
        let cases: Vec<TypeRef> = vec![
            TypeRef::primitive("int"),
            TypeRef::void(),
            TypeRef::type_param("T"),
            ClassRef::new("com.example.Shape").with_dimensions(1).into(),
            TypeRef::class("java.util.List"),
            TypeRef::class("com.example.Unknown"),
            list_of("com.example.Unknown").into(),
        ];
        for type_ref in cases {
            let property = drawing_property("value", type_ref.clone());
            assert!(
                ctx.substituted_properties_of(&property).is_empty(),
                "unexpected substitution for {type_ref}"
            );
        }
    }

    #[test]
    fn test_expand_interleaves_substitutes() {
        let mut ctx = shapes();
        let drawing = ctx
            .register_buildable(
                class("com.example.Drawing")
                    .with_property(Property::new("shapes", list_of("com.example.Shape")))
                    .with_property(Property::new("title", TypeRef::class("java.lang.String"))),
            )
            .clone();

        let expanded = ctx.expand(&drawing);
        let names: Vec<_> = expanded.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["shapes", "circleShapes", "squareShapes", "title"]);
        assert_eq!(
            expanded.properties[0].attributes.text(AttributeKey::Init),
            Some("java.util.ArrayList")
        );
    }

    #[test]
    fn test_lazy_collections_skip_init() {
        let mut ctx = shapes();
        let drawing = ctx
            .register_buildable(
                class("com.example.Drawing")
                    .with_attribute(AttributeKey::LazyCollectionsInitEnabled, true)
                    .with_property(Property::new("shapes", list_of("com.example.Shape"))),
            )
            .clone();

        let expanded = ctx.expand(&drawing);
        assert!(
            expanded
                .properties
                .iter()
                .all(|p| !p.attributes.contains(AttributeKey::Init))
        );
    }

    #[test]
    fn test_lazy_maps_skip_init() {
        let mut ctx = shapes();
        let drawing = ctx
            .register_buildable(
                class("com.example.Drawing")
                    .with_attribute(AttributeKey::LazyMapInitEnabled, true)
                    .with_property(Property::new(
                        "layers",
                        ClassRef::new("java.util.Map").with_arguments([
                            TypeRef::class("java.lang.String"),
                            TypeRef::class("com.example.Shape"),
                        ]),
                    ))
                    .with_property(Property::new("shapes", list_of("com.example.Shape"))),
            )
            .clone();

        let expanded = ctx.expand(&drawing);
        let init = |name: &str| {
            expanded
                .properties
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.attributes.text(AttributeKey::Init))
        };
        assert_eq!(init("layers"), None);
        assert_eq!(init("circleLayers"), None);
        assert_eq!(init("squareLayers"), None);
        assert_eq!(init("shapes"), Some("java.util.ArrayList"));
        assert_eq!(init("circleShapes"), Some("java.util.ArrayList"));
    }

    #[test]
    fn test_sequence_of_arrays_not_substituted() {
        let mut ctx = shapes();
        let grid = drawing_property(
            "grid",
            ClassRef::new("java.util.List")
                .with_arguments([ClassRef::new("com.example.Shape").with_dimensions(1).into()]),
        );
        assert!(ctx.substituted_properties_of(&grid).is_empty());
    }
}
