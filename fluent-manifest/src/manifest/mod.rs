//! Manifest types and parsing for fluent.toml files.

mod file;
mod kind;
mod parse;
mod validate;

pub use file::FluentToml;
pub use kind::KindDecl;
use serde::{Deserialize, Deserializer};
use toml::Spanned;
pub use validate::ParseContext;

/// Root manifest for fluent.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Resolver limits
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Builder options applied to every buildable type
    #[serde(default)]
    pub defaults: BuildableOptions,

    /// Declared types, in registration order
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Manifest {
    /// Find a declared type by fully-qualified name.
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name.get_ref() == name)
    }

    /// Declared types that requested builder generation.
    pub fn buildables(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter().filter(|t| t.is_buildable())
    }
}

/// `[generator]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// How many times a type may reappear on one resolution path.
    #[serde(default = "default_limit")]
    pub max_recursion_level: usize,

    /// How many property hops resolution follows from a root type.
    #[serde(default = "default_limit")]
    pub max_nesting_depth: usize,
}

fn default_limit() -> usize {
    2
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_recursion_level: default_limit(),
            max_nesting_depth: default_limit(),
        }
    }
}

/// Per-type builder options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildableOptions {
    #[serde(default)]
    pub validation: bool,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub lazy_collections: bool,
    #[serde(default)]
    pub lazy_maps: bool,
}

/// Per-type overrides of `[defaults]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildableOverrides {
    pub validation: Option<bool>,
    pub editable: Option<bool>,
    pub lazy_collections: Option<bool>,
    pub lazy_maps: Option<bool>,
}

impl BuildableOverrides {
    /// Apply the overrides on top of `defaults`.
    pub fn apply(&self, defaults: BuildableOptions) -> BuildableOptions {
        BuildableOptions {
            validation: self.validation.unwrap_or(defaults.validation),
            editable: self.editable.unwrap_or(defaults.editable),
            lazy_collections: self.lazy_collections.unwrap_or(defaults.lazy_collections),
            lazy_maps: self.lazy_maps.unwrap_or(defaults.lazy_maps),
        }
    }
}

/// `buildable = true` or `buildable = { editable = true, ... }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Buildable {
    Flag(bool),
    Options(BuildableOverrides),
}

impl Default for Buildable {
    fn default() -> Self {
        Buildable::Flag(false)
    }
}

/// A `[[types]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Fully-qualified name
    pub name: Spanned<String>,

    #[serde(default)]
    pub kind: KindDecl,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Extended types: a single name or a list
    #[serde(default, deserialize_with = "one_or_many")]
    pub extends: Vec<String>,

    #[serde(default)]
    pub implements: Vec<String>,

    /// Type parameter names
    #[serde(default)]
    pub parameters: Vec<String>,

    #[serde(default)]
    pub buildable: Buildable,

    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
}

impl TypeDecl {
    pub fn is_buildable(&self) -> bool {
        !matches!(self.buildable, Buildable::Flag(false))
    }

    /// Effective builder options, or `None` when the type is not buildable.
    pub fn buildable_options(&self, defaults: BuildableOptions) -> Option<BuildableOptions> {
        match self.buildable {
            Buildable::Flag(false) => None,
            Buildable::Flag(true) => Some(defaults),
            Buildable::Options(overrides) => Some(overrides.apply(defaults)),
        }
    }
}

/// A `[[types.properties]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDecl {
    pub name: Spanned<String>,

    /// Type expression, see [`TypeExpr`](crate::TypeExpr)
    #[serde(rename = "type")]
    pub type_expr: Spanned<String>,

    /// Never substitute descendants for this property
    #[serde(default)]
    pub ignore_descendants: bool,

    /// Only substitute descendants whose fully-qualified name matches
    pub filter_descendants: Option<Spanned<String>>,
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}
