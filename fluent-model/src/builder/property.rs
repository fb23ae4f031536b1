use super::{
    AnnotationRefBuilder, Builder, BuilderError, ClassRefBuilder, Nested, PrimitiveRefBuilder,
    TypeParamRefBuilder, VoidRefBuilder, WildcardRefBuilder,
};
use crate::{
    AnnotationRef, AttributeKey, AttributeValue, Attributes, ClassRef, Modifiers, PrimitiveRef,
    Property, TypeName, TypeParamRef, TypeRef, VoidRef, WildcardRef,
};

/// Fluent builder for [`Property`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBuilder {
    name: Option<String>,
    type_ref: Option<TypeRef>,
    annotations: Vec<AnnotationRef>,
    modifiers: Modifiers,
    attributes: Attributes,
    origin: Option<TypeName>,
}

impl PropertyBuilder {
    nested_sequence_ops!(annotations, annotation, AnnotationRef, AnnotationRefBuilder);
    type_ref_ops!(type_ref, type);

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_origin(mut self, origin: TypeName) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&Property> for PropertyBuilder {
    fn from(value: &Property) -> Self {
        Self {
            name: Some(value.name.clone()),
            type_ref: Some(value.type_ref.clone()),
            annotations: value.annotations.clone(),
            modifiers: value.modifiers,
            attributes: value.attributes.clone(),
            origin: value.origin.clone(),
        }
    }
}

impl Builder for PropertyBuilder {
    type Output = Property;

    fn build(&self) -> Result<Property, BuilderError> {
        let name = self.name.clone().ok_or(BuilderError::Missing {
            builder: "PropertyBuilder",
            field: "name",
        })?;
        let type_ref = self.type_ref.clone().ok_or(BuilderError::Missing {
            builder: "PropertyBuilder",
            field: "type_ref",
        })?;
        Ok(Property {
            name,
            type_ref,
            annotations: self.annotations.clone(),
            modifiers: self.modifiers,
            attributes: self.attributes.clone(),
            origin: self.origin.clone(),
        })
    }
}

impl Property {
    /// A builder seeded with this property.
    pub fn edit(&self) -> PropertyBuilder {
        PropertyBuilder::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IGNORE_DESCENDANTS, TypeRefVariant};

    #[test]
    fn test_second_variant_replaces_first() {
        let property = PropertyBuilder::default()
            .with_name("shape")
            .with_class_ref_type(ClassRef::new("com.example.Shape"))
            .with_primitive_ref_type(PrimitiveRef::new("int"))
            .build()
            .unwrap();

        assert_eq!(property.type_ref, TypeRef::primitive("int"));
    }

    #[test]
    fn test_nested_variant_entry_point() {
        let property = PropertyBuilder::default()
            .with_name("count")
            .with_void_ref_type(VoidRef::default())
            .with_new_class_ref_type()
            .edit(|b| {
                b.with_fully_qualified_name("java.util.List")
                    .add_to_arguments(TypeRef::class("com.example.Circle"))
            })
            .and()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(property.type_ref.variant(), TypeRefVariant::Class);
        assert_eq!(
            property.type_ref.to_string(),
            "java.util.List<com.example.Circle>"
        );
    }

    #[test]
    fn test_nested_like_starts_from_seed() {
        let seed = TypeParamRef::new("T");
        let builder = PropertyBuilder::default()
            .with_name("value")
            .with_new_type_param_ref_type_like(&seed)
            .edit(|b| b.with_dimensions(1))
            .and()
            .unwrap();

        assert_eq!(
            builder.build_type_ref().map(|t| t.to_string()),
            Some("T[]".to_string())
        );
    }

    #[test]
    fn test_missing_type_is_reported() {
        let err = PropertyBuilder::default().with_name("x").build().unwrap_err();
        assert_eq!(
            err,
            BuilderError::Missing {
                builder: "PropertyBuilder",
                field: "type_ref"
            }
        );
    }

    #[test]
    fn test_edit_annotation_rewrites_in_place() {
        let property = Property::new("shapes", TypeRef::class("java.util.List"))
            .with_annotation(AnnotationRef::new("com.example.First"))
            .with_annotation(AnnotationRef::new(IGNORE_DESCENDANTS));

        let edited = property
            .edit()
            .edit_matching_annotation(|a| a.is(IGNORE_DESCENDANTS))
            .unwrap()
            .edit(|b| b.with_class_ref(ClassRef::new("com.example.Second")))
            .and()
            .unwrap()
            .build()
            .unwrap();

        let names: Vec<_> = edited
            .annotations
            .iter()
            .map(|a| a.class_ref.fully_qualified_name.as_str())
            .collect();
        assert_eq!(names, ["com.example.First", "com.example.Second"]);
    }

    #[test]
    fn test_edit_annotation_failures() {
        let builder = PropertyBuilder::default();
        assert!(matches!(
            builder.clone().edit_first_annotation(),
            Err(BuilderError::Empty { field: "annotations" })
        ));
        assert!(matches!(
            builder.clone().edit_last_annotation(),
            Err(BuilderError::Empty { field: "annotations" })
        ));

        let builder = builder.add_to_annotations(AnnotationRef::new("com.example.Marker"));
        assert!(matches!(
            builder.clone().edit_annotation(3),
            Err(BuilderError::IndexOutOfRange {
                field: "annotations",
                index: 3,
                len: 1
            })
        ));
        assert!(matches!(
            builder.edit_matching_annotation(|a| a.is(IGNORE_DESCENDANTS)),
            Err(BuilderError::NoMatch { field: "annotations" })
        ));
    }

    #[test]
    fn test_wildcard_variant() {
        let property = PropertyBuilder::default()
            .with_name("any")
            .with_wildcard_ref_type(WildcardRef::default())
            .build()
            .unwrap();
        assert_eq!(property.type_ref.to_string(), "?");
    }
}
