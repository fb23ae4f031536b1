//! Type references.
//!
//! A [`TypeRef`] is a use-site reference to a type. Class references name
//! their definition by fully-qualified name; the definition itself is
//! resolved through a [`TypeLookup`](crate::TypeLookup).

use std::fmt;

use serde::Serialize;

use crate::Attributes;

/// Fully-qualified name of the root object type.
pub const OBJECT: &str = "java.lang.Object";

/// Split a fully-qualified name into `(package, simple name)`.
///
/// Names without a package return an empty package.
pub fn split_qualified_name(fqn: &str) -> (&str, &str) {
    match fqn.rsplit_once('.') {
        Some((package, name)) => (package, name),
        None => ("", fqn),
    }
}

/// A reference to a type at a use site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(PrimitiveRef),
    Void(VoidRef),
    Wildcard(WildcardRef),
    Class(ClassRef),
    TypeParam(TypeParamRef),
}

/// Variant tag of a [`TypeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRefVariant {
    Primitive,
    Void,
    Wildcard,
    Class,
    TypeParam,
}

impl TypeRefVariant {
    /// Every variant, in declaration order.
    pub const ALL: [TypeRefVariant; 5] = [
        TypeRefVariant::Primitive,
        TypeRefVariant::Void,
        TypeRefVariant::Wildcard,
        TypeRefVariant::Class,
        TypeRefVariant::TypeParam,
    ];

    /// Name of the reference type carried by the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypeRefVariant::Primitive => "PrimitiveRef",
            TypeRefVariant::Void => "VoidRef",
            TypeRefVariant::Wildcard => "WildcardRef",
            TypeRefVariant::Class => "ClassRef",
            TypeRefVariant::TypeParam => "TypeParamRef",
        }
    }
}

impl TypeRef {
    /// Reference a primitive type (e.g., `int`).
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeRef::Primitive(PrimitiveRef::new(name))
    }

    /// Reference `void`.
    pub fn void() -> Self {
        TypeRef::Void(VoidRef::default())
    }

    /// Reference a class by fully-qualified name, without type arguments.
    pub fn class(fqn: impl Into<String>) -> Self {
        TypeRef::Class(ClassRef::new(fqn))
    }

    /// Reference a type parameter.
    pub fn type_param(name: impl Into<String>) -> Self {
        TypeRef::TypeParam(TypeParamRef::new(name))
    }

    /// Get the variant tag.
    pub fn variant(&self) -> TypeRefVariant {
        match self {
            TypeRef::Primitive(_) => TypeRefVariant::Primitive,
            TypeRef::Void(_) => TypeRefVariant::Void,
            TypeRef::Wildcard(_) => TypeRefVariant::Wildcard,
            TypeRef::Class(_) => TypeRefVariant::Class,
            TypeRef::TypeParam(_) => TypeRefVariant::TypeParam,
        }
    }

    /// Get the class reference, if this is one.
    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            TypeRef::Class(class_ref) => Some(class_ref),
            _ => None,
        }
    }

    /// Number of array dimensions (0 for void and wildcards).
    pub fn dimensions(&self) -> u32 {
        match self {
            TypeRef::Primitive(r) => r.dimensions,
            TypeRef::Class(r) => r.dimensions,
            TypeRef::TypeParam(r) => r.dimensions,
            TypeRef::Void(_) | TypeRef::Wildcard(_) => 0,
        }
    }
}

impl From<PrimitiveRef> for TypeRef {
    fn from(value: PrimitiveRef) -> Self {
        TypeRef::Primitive(value)
    }
}

impl From<VoidRef> for TypeRef {
    fn from(value: VoidRef) -> Self {
        TypeRef::Void(value)
    }
}

impl From<WildcardRef> for TypeRef {
    fn from(value: WildcardRef) -> Self {
        TypeRef::Wildcard(value)
    }
}

impl From<ClassRef> for TypeRef {
    fn from(value: ClassRef) -> Self {
        TypeRef::Class(value)
    }
}

impl From<TypeParamRef> for TypeRef {
    fn from(value: TypeParamRef) -> Self {
        TypeRef::TypeParam(value)
    }
}

/// A primitive type such as `int` or `boolean[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PrimitiveRef {
    pub name: String,
    pub dimensions: u32,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl PrimitiveRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions: 0,
            attributes: Attributes::default(),
        }
    }
}

/// The `void` type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VoidRef {
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// Direction of a wildcard bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    #[default]
    Extends,
    Super,
}

/// A wildcard such as `?` or `? extends Shape`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct WildcardRef {
    pub bound_kind: BoundKind,
    pub bounds: Vec<TypeRef>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// A reference to a class, interface, enum or annotation type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassRef {
    pub fully_qualified_name: String,
    pub arguments: Vec<TypeRef>,
    pub dimensions: u32,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl ClassRef {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self {
            fully_qualified_name: fqn.into(),
            arguments: Vec::new(),
            dimensions: 0,
            attributes: Attributes::default(),
        }
    }

    /// Replace the type arguments.
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = TypeRef>) -> Self {
        self.arguments = arguments.into_iter().collect();
        self
    }

    /// Set the number of array dimensions.
    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Simple name (last segment of the fully-qualified name).
    pub fn name(&self) -> &str {
        split_qualified_name(&self.fully_qualified_name).1
    }

    /// Package name (everything before the last segment).
    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.fully_qualified_name).0
    }
}

/// A reference to a type parameter such as `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeParamRef {
    pub name: String,
    pub bounds: Vec<TypeRef>,
    pub dimensions: u32,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl TypeParamRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
            dimensions: 0,
            attributes: Attributes::default(),
        }
    }
}

fn write_dimensions(f: &mut fmt::Formatter<'_>, dimensions: u32) -> fmt::Result {
    for _ in 0..dimensions {
        write!(f, "[]")?;
    }
    Ok(())
}

fn write_joined(f: &mut fmt::Formatter<'_>, refs: &[TypeRef], separator: &str) -> fmt::Result {
    for (i, r) in refs.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", r)?;
    }
    Ok(())
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(r) => {
                write!(f, "{}", r.name)?;
                write_dimensions(f, r.dimensions)
            }
            TypeRef::Void(_) => write!(f, "void"),
            TypeRef::Wildcard(r) => {
                write!(f, "?")?;
                if !r.bounds.is_empty() {
                    match r.bound_kind {
                        BoundKind::Extends => write!(f, " extends ")?,
                        BoundKind::Super => write!(f, " super ")?,
                    }
                    write_joined(f, &r.bounds, " & ")?;
                }
                Ok(())
            }
            TypeRef::Class(r) => write!(f, "{}", r),
            TypeRef::TypeParam(r) => {
                write!(f, "{}", r.name)?;
                write_dimensions(f, r.dimensions)
            }
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fully_qualified_name)?;
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            write_joined(f, &self.arguments, ", ")?;
            write!(f, ">")?;
        }
        write_dimensions(f, self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::AttributeKey;

    #[test]
    fn test_split_qualified_name() {
        assert_eq!(
            split_qualified_name("com.example.Shape"),
            ("com.example", "Shape")
        );
        assert_eq!(split_qualified_name("Shape"), ("", "Shape"));
    }

    #[test]
    fn test_display() {
        let list = ClassRef::new("java.util.List")
            .with_arguments([TypeRef::class("com.example.Shape")]);
        assert_eq!(list.to_string(), "java.util.List<com.example.Shape>");

        let map = ClassRef::new("java.util.Map")
            .with_arguments([TypeRef::class("java.lang.String"), TypeRef::type_param("T")]);
        assert_eq!(map.to_string(), "java.util.Map<java.lang.String, T>");

        let mut ints = PrimitiveRef::new("int");
        ints.dimensions = 2;
        assert_eq!(TypeRef::from(ints).to_string(), "int[][]");

        let wildcard = WildcardRef {
            bound_kind: BoundKind::Super,
            bounds: vec![TypeRef::class("com.example.Circle")],
            ..Default::default()
        };
        assert_eq!(
            TypeRef::from(wildcard).to_string(),
            "? super com.example.Circle"
        );
        assert_eq!(TypeRef::from(WildcardRef::default()).to_string(), "?");
        assert_eq!(TypeRef::void().to_string(), "void");
    }

    #[test]
    fn test_equality_accounts_for_variant_and_fields() {
        let class = TypeRef::class("T");
        let param = TypeRef::type_param("T");
        assert_ne!(class, param);

        let set: HashSet<TypeRef> = [
            TypeRef::class("com.example.Shape"),
            TypeRef::class("com.example.Shape"),
            TypeRef::Class(ClassRef::new("com.example.Shape").with_dimensions(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);

        let mut tagged = ClassRef::new("com.example.Shape");
        tagged.attributes.insert(AttributeKey::Generated, true);
        assert_ne!(TypeRef::Class(tagged), TypeRef::class("com.example.Shape"));
    }

    #[test]
    fn test_variant_table() {
        let variants: Vec<_> = [
            TypeRef::primitive("int"),
            TypeRef::void(),
            TypeRef::from(WildcardRef::default()),
            TypeRef::class("com.example.Shape"),
            TypeRef::type_param("T"),
        ]
        .iter()
        .map(TypeRef::variant)
        .collect();
        assert_eq!(variants, TypeRefVariant::ALL);
        assert_eq!(TypeRefVariant::Class.type_name(), "ClassRef");
    }

    #[test]
    fn test_class_ref_names() {
        let r = ClassRef::new("com.example.shapes.Circle");
        assert_eq!(r.name(), "Circle");
        assert_eq!(r.package_name(), "com.example.shapes");
    }
}
