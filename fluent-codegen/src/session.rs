//! Per-run generation session.

use std::collections::HashMap;

use fluentgen_manifest::GeneratorConfig;
use fluentgen_model::{AttributeKey, TypeDef};
use serde::Serialize;
use tracing::debug;

use crate::repository::{BuildableRepository, DefinitionRepository};

/// Limits on the nested-builder walk performed by
/// [`BuilderContext::resolve`](crate::BuilderContext::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolverSettings {
    /// How many times one type may occur on the active resolution path.
    pub max_recursion_level: usize,
    /// How many property hops the walk follows from its root.
    pub max_nesting_depth: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_recursion_level: 2,
            max_nesting_depth: 2,
        }
    }
}

impl From<GeneratorConfig> for ResolverSettings {
    fn from(config: GeneratorConfig) -> Self {
        Self {
            max_recursion_level: config.max_recursion_level,
            max_nesting_depth: config.max_nesting_depth,
        }
    }
}

/// State shared by everything that runs during one generation.
///
/// Owns the repositories and the descendant cache. Register every type
/// first, then resolve. Registering afterwards leaves cached descendant
/// sets stale until [`invalidate`](Self::invalidate) is called.
#[derive(Debug, Clone, Default)]
pub struct BuilderContext {
    settings: ResolverSettings,
    definitions: DefinitionRepository,
    buildables: BuildableRepository,
    pub(crate) descendants: HashMap<String, Vec<TypeDef>>,
}

impl BuilderContext {
    pub fn new(settings: ResolverSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    pub fn definitions(&self) -> &DefinitionRepository {
        &self.definitions
    }

    pub fn buildables(&self) -> &BuildableRepository {
        &self.buildables
    }

    /// Make a definition known for supertype lookups without requesting a
    /// builder for it.
    pub fn register_definition(&mut self, def: TypeDef) {
        debug!(fqn = %def.fully_qualified_name(), "registered definition");
        self.definitions.register(def);
    }

    /// Register a type that gets a builder.
    ///
    /// The stored copy is tagged [`AttributeKey::Buildable`].
    pub fn register_buildable(&mut self, def: TypeDef) -> &TypeDef {
        let def = def.with_attribute(AttributeKey::Buildable, true);
        debug!(fqn = %def.fully_qualified_name(), "registered buildable");
        self.definitions.register(def.clone());
        self.buildables.register(def)
    }

    /// Remove a type from the buildable set. It stays known as a definition.
    pub fn unregister_buildable(&mut self, def: &TypeDef) -> Option<TypeDef> {
        self.buildables.unregister(def)
    }

    /// Drop every cached descendant set.
    pub fn invalidate(&mut self) {
        debug!(entries = self.descendants.len(), "descendant cache invalidated");
        self.descendants.clear();
    }

    /// Reset the session: repositories and cache.
    pub fn clear(&mut self) {
        self.definitions.clear();
        self.buildables.clear();
        self.descendants.clear();
    }
}

#[cfg(test)]
mod tests {
    use fluentgen_model::Kind;

    use super::*;

    #[test]
    fn test_register_buildable_tags_and_records_definition() {
        let mut ctx = BuilderContext::default();
        let stored = ctx.register_buildable(TypeDef::new(Kind::Class, "com.example.Circle"));
        assert!(stored.attributes.flag(AttributeKey::Buildable));

        assert!(ctx.definitions().contains("com.example.Circle"));
        assert_eq!(ctx.buildables().len(), 1);
    }

    #[test]
    fn test_unregister_keeps_definition() {
        let mut ctx = BuilderContext::default();
        let circle = TypeDef::new(Kind::Class, "com.example.Circle");
        ctx.register_buildable(circle.clone());

        assert!(ctx.unregister_buildable(&circle).is_some());
        assert!(ctx.buildables().is_empty());
        assert!(ctx.definitions().contains("com.example.Circle"));
    }

    #[test]
    fn test_clear() {
        let mut ctx = BuilderContext::new(ResolverSettings {
            max_recursion_level: 1,
            max_nesting_depth: 5,
        });
        ctx.register_definition(TypeDef::new(Kind::Interface, "java.util.List"));
        ctx.register_buildable(TypeDef::new(Kind::Class, "com.example.Circle"));

        ctx.clear();
        assert!(ctx.definitions().is_empty());
        assert!(ctx.buildables().is_empty());
        assert_eq!(ctx.settings().max_nesting_depth, 5);
    }

    #[test]
    fn test_settings_from_generator_config() {
        let settings = ResolverSettings::from(GeneratorConfig {
            max_recursion_level: 3,
            max_nesting_depth: 4,
        });
        assert_eq!(settings.max_recursion_level, 3);
        assert_eq!(settings.max_nesting_depth, 4);
        assert_eq!(ResolverSettings::default().max_recursion_level, 2);
    }
}
