//! Builders for type references and annotations.

use std::collections::BTreeMap;

use super::{Builder, BuilderError, Nested};
use crate::{
    AnnotationRef, AnnotationValue, AttributeKey, AttributeValue, Attributes, BoundKind, ClassRef,
    PrimitiveRef, TypeParamRef, TypeRef, VoidRef, WildcardRef,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveRefBuilder {
    name: Option<String>,
    dimensions: u32,
    attributes: Attributes,
}

impl PrimitiveRefBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&PrimitiveRef> for PrimitiveRefBuilder {
    fn from(value: &PrimitiveRef) -> Self {
        Self {
            name: Some(value.name.clone()),
            dimensions: value.dimensions,
            attributes: value.attributes.clone(),
        }
    }
}

impl Builder for PrimitiveRefBuilder {
    type Output = PrimitiveRef;

    fn build(&self) -> Result<PrimitiveRef, BuilderError> {
        let name = self.name.clone().ok_or(BuilderError::Missing {
            builder: "PrimitiveRefBuilder",
            field: "name",
        })?;
        Ok(PrimitiveRef {
            name,
            dimensions: self.dimensions,
            attributes: self.attributes.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoidRefBuilder {
    attributes: Attributes,
}

impl VoidRefBuilder {
    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&VoidRef> for VoidRefBuilder {
    fn from(value: &VoidRef) -> Self {
        Self {
            attributes: value.attributes.clone(),
        }
    }
}

impl Builder for VoidRefBuilder {
    type Output = VoidRef;

    fn build(&self) -> Result<VoidRef, BuilderError> {
        Ok(VoidRef {
            attributes: self.attributes.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WildcardRefBuilder {
    bound_kind: BoundKind,
    bounds: Vec<TypeRef>,
    attributes: Attributes,
}

impl WildcardRefBuilder {
    sequence_ops!(build, bounds, bound, TypeRef);

    pub fn with_bound_kind(mut self, bound_kind: BoundKind) -> Self {
        self.bound_kind = bound_kind;
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&WildcardRef> for WildcardRefBuilder {
    fn from(value: &WildcardRef) -> Self {
        Self {
            bound_kind: value.bound_kind,
            bounds: value.bounds.clone(),
            attributes: value.attributes.clone(),
        }
    }
}

impl Builder for WildcardRefBuilder {
    type Output = WildcardRef;

    fn build(&self) -> Result<WildcardRef, BuilderError> {
        Ok(WildcardRef {
            bound_kind: self.bound_kind,
            bounds: self.bounds.clone(),
            attributes: self.attributes.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassRefBuilder {
    fully_qualified_name: Option<String>,
    arguments: Vec<TypeRef>,
    dimensions: u32,
    attributes: Attributes,
}

impl ClassRefBuilder {
    sequence_ops!(build, arguments, argument, TypeRef);

    pub fn with_fully_qualified_name(mut self, fqn: impl Into<String>) -> Self {
        self.fully_qualified_name = Some(fqn.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&ClassRef> for ClassRefBuilder {
    fn from(value: &ClassRef) -> Self {
        Self {
            fully_qualified_name: Some(value.fully_qualified_name.clone()),
            arguments: value.arguments.clone(),
            dimensions: value.dimensions,
            attributes: value.attributes.clone(),
        }
    }
}

impl Builder for ClassRefBuilder {
    type Output = ClassRef;

    fn build(&self) -> Result<ClassRef, BuilderError> {
        let fully_qualified_name =
            self.fully_qualified_name
                .clone()
                .ok_or(BuilderError::Missing {
                    builder: "ClassRefBuilder",
                    field: "fully_qualified_name",
                })?;
        Ok(ClassRef {
            fully_qualified_name,
            arguments: self.arguments.clone(),
            dimensions: self.dimensions,
            attributes: self.attributes.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeParamRefBuilder {
    name: Option<String>,
    bounds: Vec<TypeRef>,
    dimensions: u32,
    attributes: Attributes,
}

impl TypeParamRefBuilder {
    sequence_ops!(build, bounds, bound, TypeRef);

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&TypeParamRef> for TypeParamRefBuilder {
    fn from(value: &TypeParamRef) -> Self {
        Self {
            name: Some(value.name.clone()),
            bounds: value.bounds.clone(),
            dimensions: value.dimensions,
            attributes: value.attributes.clone(),
        }
    }
}

impl Builder for TypeParamRefBuilder {
    type Output = TypeParamRef;

    fn build(&self) -> Result<TypeParamRef, BuilderError> {
        let name = self.name.clone().ok_or(BuilderError::Missing {
            builder: "TypeParamRefBuilder",
            field: "name",
        })?;
        Ok(TypeParamRef {
            name,
            bounds: self.bounds.clone(),
            dimensions: self.dimensions,
            attributes: self.attributes.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationRefBuilder {
    class_ref: Option<ClassRef>,
    parameters: BTreeMap<String, AnnotationValue>,
}

impl AnnotationRefBuilder {
    nested_ops!(class_ref, ClassRef, ClassRefBuilder);

    pub fn add_to_parameters(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn remove_from_parameters(mut self, name: &str) -> Self {
        self.parameters.remove(name);
        self
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }
}

impl From<&AnnotationRef> for AnnotationRefBuilder {
    fn from(value: &AnnotationRef) -> Self {
        Self {
            class_ref: Some(value.class_ref.clone()),
            parameters: value.parameters.clone(),
        }
    }
}

impl Builder for AnnotationRefBuilder {
    type Output = AnnotationRef;

    fn build(&self) -> Result<AnnotationRef, BuilderError> {
        let class_ref = self.class_ref.clone().ok_or(BuilderError::Missing {
            builder: "AnnotationRefBuilder",
            field: "class_ref",
        })?;
        Ok(AnnotationRef {
            class_ref,
            parameters: self.parameters.clone(),
        })
    }
}
