//! Session-scoped type registries.

use fluentgen_model::{TypeDef, TypeLookup, TypeRef};
use indexmap::IndexMap;

/// Registry of types that requested builder generation.
///
/// Keyed by fully-qualified name. Iteration follows registration order, and
/// re-registering a type replaces the stored definition in its original
/// slot.
#[derive(Debug, Clone, Default)]
pub struct BuildableRepository {
    types: IndexMap<String, TypeDef>,
}

impl BuildableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, returning the stored copy.
    pub fn register(&mut self, def: TypeDef) -> &TypeDef {
        let fqn = def.fully_qualified_name();
        let entry = self.types.entry(fqn);
        match entry {
            indexmap::map::Entry::Occupied(mut slot) => {
                slot.insert(def);
                slot.into_mut()
            }
            indexmap::map::Entry::Vacant(slot) => slot.insert(def),
        }
    }

    /// Remove a definition, keeping the relative order of the rest.
    pub fn unregister(&mut self, def: &TypeDef) -> Option<TypeDef> {
        self.types.shift_remove(&def.fully_qualified_name())
    }

    pub fn get(&self, fqn: &str) -> Option<&TypeDef> {
        self.types.get(fqn)
    }

    /// Look up the definition a class reference points at.
    pub fn get_by_ref(&self, type_ref: &TypeRef) -> Option<&TypeDef> {
        type_ref
            .as_class()
            .and_then(|class_ref| self.get(&class_ref.fully_qualified_name))
    }

    pub fn is_buildable(&self, def: &TypeDef) -> bool {
        self.types.contains_key(&def.fully_qualified_name())
    }

    pub fn is_buildable_ref(&self, type_ref: &TypeRef) -> bool {
        self.get_by_ref(type_ref).is_some()
    }

    /// Iterate over registered definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn clear(&mut self) {
        self.types.clear();
    }
}

/// Every definition known to the session, buildable or not.
///
/// Serves supertype lookups for the assignability relation.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRepository {
    types: IndexMap<String, TypeDef>,
}

impl DefinitionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same name.
    pub fn register(&mut self, def: TypeDef) {
        self.types.insert(def.fully_qualified_name(), def);
    }

    pub fn get(&self, fqn: &str) -> Option<&TypeDef> {
        self.types.get(fqn)
    }

    /// Look up the definition a class reference points at.
    pub fn get_by_ref(&self, type_ref: &TypeRef) -> Option<&TypeDef> {
        type_ref
            .as_class()
            .and_then(|class_ref| self.get(&class_ref.fully_qualified_name))
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn clear(&mut self) {
        self.types.clear();
    }
}

impl TypeLookup for DefinitionRepository {
    fn lookup(&self, fqn: &str) -> Option<&TypeDef> {
        self.get(fqn)
    }
}
