//! Type definitions, properties and methods.

use std::{collections::BTreeMap, fmt};

use fluentgen_core::capitalize;
use serde::Serialize;

use crate::{AttributeKey, Attributes, ClassRef, OBJECT, TypeRef, split_qualified_name};

/// Annotation marking a property whose descendants must not be substituted.
pub const IGNORE_DESCENDANTS: &str = "io.fluentgen.annotations.IgnoreDescendants";

/// Annotation restricting substituted descendants to those whose
/// fully-qualified name matches the `value` pattern.
pub const FILTER_DESCENDANTS: &str = "io.fluentgen.annotations.FilterDescendants";

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Declaration modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Modifiers {
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_static: bool,
}

/// Package plus simple name of a declaring type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TypeName {
    pub package: String,
    pub name: String,
}

impl TypeName {
    /// Split a fully-qualified name.
    pub fn from_fqn(fqn: &str) -> Self {
        let (package, name) = split_qualified_name(fqn);
        Self {
            package: package.to_string(),
            name: name.to_string(),
        }
    }

    /// Join package and simple name.
    pub fn fully_qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fully_qualified_name())
    }
}

/// A declared type parameter such as `T extends Shape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeParamDef {
    pub name: String,
    pub bounds: Vec<ClassRef>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl TypeParamDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
            attributes: Attributes::default(),
        }
    }
}

/// An annotation parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<AnnotationValue>),
}

/// An annotation applied to a property, method or type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationRef {
    pub class_ref: ClassRef,
    pub parameters: BTreeMap<String, AnnotationValue>,
}

impl AnnotationRef {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self {
            class_ref: ClassRef::new(fqn),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter and return the annotation.
    pub fn with_parameter(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Check whether this annotation is of the given type.
    pub fn is(&self, fqn: &str) -> bool {
        self.class_ref.fully_qualified_name == fqn
    }
}

/// A property (field) of a type, or an argument of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Property {
    pub name: String,
    pub type_ref: TypeRef,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: Modifiers,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// The type that declared the property.
    pub origin: Option<TypeName>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            annotations: Vec::new(),
            modifiers: Modifiers::default(),
            attributes: Attributes::default(),
            origin: None,
        }
    }

    /// Set the declaring type.
    pub fn with_origin(mut self, origin: TypeName) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Add an annotation.
    pub fn with_annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The name with its first character uppercased.
    pub fn name_capitalized(&self) -> String {
        capitalize(&self.name)
    }

    /// Find the first annotation of the given type.
    pub fn annotation(&self, fqn: &str) -> Option<&AnnotationRef> {
        self.annotations.iter().find(|a| a.is(fqn))
    }

    /// Name of the property this synthetic property narrows, if any.
    pub fn descendant_of(&self) -> Option<&str> {
        self.attributes.text(AttributeKey::DescendantOf)
    }
}

/// A method of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Method {
    pub name: String,
    pub return_type: TypeRef,
    pub arguments: Vec<Property>,
    pub exceptions: Vec<ClassRef>,
    pub parameters: Vec<TypeParamDef>,
    pub annotations: Vec<AnnotationRef>,
    pub comments: Vec<String>,
    pub modifiers: Modifiers,
    pub var_arg_preferred: bool,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            arguments: Vec::new(),
            exceptions: Vec::new(),
            parameters: Vec::new(),
            annotations: Vec::new(),
            comments: Vec::new(),
            modifiers: Modifiers::default(),
            var_arg_preferred: false,
            attributes: Attributes::default(),
        }
    }
}

/// A class, interface, enum or annotation definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDef {
    pub kind: Kind,
    pub package: String,
    pub name: String,
    pub modifiers: Modifiers,
    pub extends: Vec<ClassRef>,
    pub implements: Vec<ClassRef>,
    pub parameters: Vec<TypeParamDef>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl TypeDef {
    /// Create an empty definition from a fully-qualified name.
    pub fn new(kind: Kind, fqn: &str) -> Self {
        let (package, name) = split_qualified_name(fqn);
        Self {
            kind,
            package: package.to_string(),
            name: name.to_string(),
            modifiers: Modifiers::default(),
            extends: Vec::new(),
            implements: Vec::new(),
            parameters: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            attributes: Attributes::default(),
        }
    }

    /// The root object type.
    pub fn object() -> Self {
        Self::new(Kind::Class, OBJECT)
    }

    pub fn fully_qualified_name(&self) -> String {
        self.type_name().fully_qualified_name()
    }

    pub fn type_name(&self) -> TypeName {
        TypeName {
            package: self.package.clone(),
            name: self.name.clone(),
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    /// Check whether this is the root object type.
    pub fn is_object(&self) -> bool {
        self.package == "java.lang" && self.name == "Object"
    }

    /// Mark the definition abstract.
    pub fn with_abstract(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self
    }

    /// Add an extended type.
    pub fn extending(mut self, fqn: impl Into<String>) -> Self {
        self.extends.push(ClassRef::new(fqn));
        self
    }

    /// Add an implemented interface.
    pub fn implementing(mut self, fqn: impl Into<String>) -> Self {
        self.implements.push(ClassRef::new(fqn));
        self
    }

    /// Add a property, recording this type as its origin.
    pub fn with_property(mut self, property: Property) -> Self {
        let origin = self.type_name();
        self.properties.push(property.with_origin(origin));
        self
    }

    /// Set an attribute and return the definition.
    pub fn with_attribute(
        mut self,
        key: AttributeKey,
        value: impl Into<crate::AttributeValue>,
    ) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Direct supertypes: extended types followed by implemented ones.
    pub fn supertypes(&self) -> impl Iterator<Item = &ClassRef> {
        self.extends.iter().chain(self.implements.iter())
    }

    /// A class reference to this definition, parameterized by its own type
    /// parameters.
    pub fn to_reference(&self) -> ClassRef {
        ClassRef::new(self.fully_qualified_name()).with_arguments(
            self.parameters
                .iter()
                .map(|p| TypeRef::type_param(p.name.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_def_names() {
        let def = TypeDef::new(Kind::Class, "com.example.Circle");
        assert_eq!(def.package, "com.example");
        assert_eq!(def.name, "Circle");
        assert_eq!(def.fully_qualified_name(), "com.example.Circle");

        let bare = TypeDef::new(Kind::Interface, "Shape");
        assert_eq!(bare.package, "");
        assert_eq!(bare.fully_qualified_name(), "Shape");
    }

    #[test]
    fn test_object_sentinel() {
        assert!(TypeDef::object().is_object());
        assert!(!TypeDef::new(Kind::Class, "com.example.Object").is_object());
    }

    #[test]
    fn test_with_property_sets_origin() {
        let def = TypeDef::new(Kind::Class, "com.example.Drawing")
            .with_property(Property::new("title", TypeRef::class("java.lang.String")));

        let origin = def.properties[0].origin.as_ref().unwrap();
        assert_eq!(origin.package, "com.example");
        assert_eq!(origin.name, "Drawing");
    }

    #[test]
    fn test_to_reference_uses_type_parameters() {
        let mut def = TypeDef::new(Kind::Class, "com.example.Box");
        def.parameters.push(TypeParamDef::new("T"));
        assert_eq!(def.to_reference().to_string(), "com.example.Box<T>");
    }

    #[test]
    fn test_property_annotation_lookup() {
        let property = Property::new("shapes", TypeRef::class("java.util.List"))
            .with_annotation(AnnotationRef::new(IGNORE_DESCENDANTS));

        assert!(property.annotation(IGNORE_DESCENDANTS).is_some());
        assert!(property.annotation(FILTER_DESCENDANTS).is_none());
        assert_eq!(property.name_capitalized(), "Shapes");
    }
}
