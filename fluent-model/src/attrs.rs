//! Attribute bag attached to model nodes.
//!
//! Attributes stash cross-cutting flags on types, references and properties
//! without widening the core shapes. The recognized keys are a closed set.

use std::collections::BTreeMap;

use serde::Serialize;

/// Recognized attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    /// Builder generation was requested for the type.
    Buildable,
    /// The generated `build()` validates the instance.
    ValidationEnabled,
    /// The type gets an `edit()` entry point returning a seeded builder.
    EditableEnabled,
    /// Sequence properties start absent instead of empty.
    LazyCollectionsInitEnabled,
    /// Map properties start absent instead of empty.
    LazyMapInitEnabled,
    /// The property receives nested builder operations.
    BuildableEnabled,
    /// Name of the property a synthetic descendant property narrows.
    DescendantOf,
    /// The type was produced by the generator itself.
    Generated,
    /// Concrete container the property is initialized with.
    Init,
}

impl AttributeKey {
    /// Get the snake_case name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Buildable => "buildable",
            AttributeKey::ValidationEnabled => "validation_enabled",
            AttributeKey::EditableEnabled => "editable_enabled",
            AttributeKey::LazyCollectionsInitEnabled => "lazy_collections_init_enabled",
            AttributeKey::LazyMapInitEnabled => "lazy_map_init_enabled",
            AttributeKey::BuildableEnabled => "buildable_enabled",
            AttributeKey::DescendantOf => "descendant_of",
            AttributeKey::Generated => "generated",
            AttributeKey::Init => "init",
        }
    }
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Str(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

/// Ordered key/value attribute store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<AttributeKey, AttributeValue>);

impl Attributes {
    /// Create an empty attribute bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, returning the previous value.
    pub fn insert(
        &mut self,
        key: AttributeKey,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key, value.into())
    }

    /// Set an attribute and return the bag.
    pub fn with(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the raw value for a key.
    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.0.get(&key)
    }

    /// Returns true only if the key holds `true`.
    pub fn flag(&self, key: AttributeKey) -> bool {
        matches!(self.0.get(&key), Some(AttributeValue::Bool(true)))
    }

    /// Get a string attribute.
    pub fn text(&self, key: AttributeKey) -> Option<&str> {
        match self.0.get(&key) {
            Some(AttributeValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Check whether a key is present, whatever its value.
    pub fn contains(&self, key: AttributeKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, key: AttributeKey) -> Option<AttributeValue> {
        self.0.remove(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &AttributeValue)> {
        self.0.iter()
    }
}
