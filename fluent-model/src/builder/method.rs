use super::{
    AnnotationRefBuilder, Builder, BuilderError, ClassRefBuilder, Nested, PrimitiveRefBuilder,
    PropertyBuilder, TypeParamRefBuilder, VoidRefBuilder, WildcardRefBuilder,
};
use crate::{
    AnnotationRef, AttributeKey, AttributeValue, Attributes, ClassRef, Method, Modifiers,
    PrimitiveRef, Property, TypeParamDef, TypeParamRef, TypeRef, VoidRef, WildcardRef,
};

/// Fluent builder for [`Method`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodBuilder {
    name: Option<String>,
    return_type: Option<TypeRef>,
    arguments: Vec<Property>,
    exceptions: Vec<ClassRef>,
    parameters: Vec<TypeParamDef>,
    annotations: Vec<AnnotationRef>,
    comments: Vec<String>,
    modifiers: Modifiers,
    var_arg_preferred: bool,
    attributes: Attributes,
}

impl MethodBuilder {
    sequence_ops!(get, comments, comment, String);
    sequence_ops!(get, parameters, parameter, TypeParamDef);
    nested_sequence_ops!(annotations, annotation, AnnotationRef, AnnotationRefBuilder);
    nested_sequence_ops!(arguments, argument, Property, PropertyBuilder);
    nested_sequence_ops!(exceptions, exception, ClassRef, ClassRefBuilder);
    type_ref_ops!(return_type, return_type);

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn with_var_arg_preferred(mut self, var_arg_preferred: bool) -> Self {
        self.var_arg_preferred = var_arg_preferred;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl From<&Method> for MethodBuilder {
    fn from(value: &Method) -> Self {
        Self {
            name: Some(value.name.clone()),
            return_type: Some(value.return_type.clone()),
            arguments: value.arguments.clone(),
            exceptions: value.exceptions.clone(),
            parameters: value.parameters.clone(),
            annotations: value.annotations.clone(),
            comments: value.comments.clone(),
            modifiers: value.modifiers,
            var_arg_preferred: value.var_arg_preferred,
            attributes: value.attributes.clone(),
        }
    }
}

impl Builder for MethodBuilder {
    type Output = Method;

    fn build(&self) -> Result<Method, BuilderError> {
        let name = self.name.clone().ok_or(BuilderError::Missing {
            builder: "MethodBuilder",
            field: "name",
        })?;
        let return_type = self.return_type.clone().ok_or(BuilderError::Missing {
            builder: "MethodBuilder",
            field: "return_type",
        })?;
        Ok(Method {
            name,
            return_type,
            arguments: self.arguments.clone(),
            exceptions: self.exceptions.clone(),
            parameters: self.parameters.clone(),
            annotations: self.annotations.clone(),
            comments: self.comments.clone(),
            modifiers: self.modifiers,
            var_arg_preferred: self.var_arg_preferred,
            attributes: self.attributes.clone(),
        })
    }
}

impl Method {
    /// A builder seeded with this method.
    pub fn edit(&self) -> MethodBuilder {
        MethodBuilder::from(self)
    }
}
