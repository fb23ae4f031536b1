//! Subtype relation over type definitions.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    hash::BuildHasher,
};

use crate::{OBJECT, TypeDef};

/// Resolves fully-qualified names to definitions.
pub trait TypeLookup {
    fn lookup(&self, fqn: &str) -> Option<&TypeDef>;
}

impl<S: BuildHasher> TypeLookup for HashMap<String, TypeDef, S> {
    fn lookup(&self, fqn: &str) -> Option<&TypeDef> {
        self.get(fqn)
    }
}

impl TypeDef {
    /// Check whether a value of type `other` can be used where `self` is
    /// expected.
    ///
    /// The relation is reflexive, every type is assignable to the object
    /// type, and supertypes are followed transitively through `lookup`.
    /// Supertypes without a definition still match by name but are not
    /// expanded further.
    pub fn is_assignable_from(&self, other: &TypeDef, lookup: &impl TypeLookup) -> bool {
        let target = self.fully_qualified_name();
        if self.is_object() || target == other.fully_qualified_name() {
            return true;
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = other
            .supertypes()
            .map(|r| r.fully_qualified_name.clone())
            .collect();

        while let Some(fqn) = queue.pop_front() {
            if fqn == target {
                return true;
            }
            if fqn == OBJECT || !visited.insert(fqn.clone()) {
                continue;
            }
            if let Some(def) = lookup.lookup(&fqn) {
                queue.extend(def.supertypes().map(|r| r.fully_qualified_name.clone()));
            }
        }
        false
    }
}
