//! Descendant discovery.
//!
//! A descendant of a type is a registered, concrete, buildable class that is
//! assignable to it. Descendant sets are cached per fully-qualified name for
//! the lifetime of the session.
//!
//! [`BuilderContext::resolve`] walks the nested-builder graph from a root
//! type: the root, its descendants, and every buildable type reachable
//! through their properties (collections and map values unwrapped). The walk
//! is bounded by [`ResolverSettings`](crate::ResolverSettings); branches that
//! exceed a limit are cut and reported in [`Resolution::truncated`].

use std::fmt;

use fluentgen_model::{AttributeKey, Kind, TypeDef};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    BuilderContext,
    containers::{self, ContainerKind},
};

/// Why a branch of the walk was cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationReason {
    NestingDepth,
    RecursionLevel,
}

impl fmt::Display for TruncationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationReason::NestingDepth => write!(f, "nesting depth"),
            TruncationReason::RecursionLevel => write!(f, "recursion level"),
        }
    }
}

/// A branch that was not followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncation {
    pub fqn: String,
    pub depth: usize,
    pub reason: TruncationReason,
}

/// Result of walking the nested-builder graph from one root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub root: String,
    /// Descendant names per visited type, in visiting order.
    pub descendants: IndexMap<String, Vec<String>>,
    pub truncated: Vec<Truncation>,
}

impl Resolution {
    /// Descendants found for a visited type.
    pub fn descendants_of(&self, fqn: &str) -> Option<&[String]> {
        self.descendants.get(fqn).map(Vec::as_slice)
    }

    pub fn is_truncated(&self) -> bool {
        !self.truncated.is_empty()
    }
}

impl BuilderContext {
    /// Check whether `candidate` accepts values of type `item`.
    pub fn is_descendant(&self, item: &TypeDef, candidate: &TypeDef) -> bool {
        candidate.is_assignable_from(item, self.definitions())
    }

    /// Registered buildable descendants of `item`, in registration order.
    ///
    /// The object type has none. Abstract types, non-classes, generated
    /// types and `item` itself are never descendants.
    pub fn descendants_of(&mut self, item: &TypeDef) -> Vec<TypeDef> {
        if item.is_object() {
            return Vec::new();
        }

        let fqn = item.fully_qualified_name();
        if let Some(cached) = self.descendants.get(&fqn) {
            trace!(fqn = %fqn, "descendant cache hit");
            return cached.clone();
        }

        let found: Vec<TypeDef> = self
            .buildables()
            .iter()
            .filter(|t| t.kind == Kind::Class)
            .filter(|t| !t.is_abstract())
            .filter(|t| !t.attributes.flag(AttributeKey::Generated))
            .filter(|t| t.fully_qualified_name() != fqn)
            .filter(|t| self.is_descendant(t, item))
            .cloned()
            .collect();

        debug!(fqn = %fqn, count = found.len(), "resolved descendants");
        self.descendants.insert(fqn, found.clone());
        found
    }

    /// Walk the nested-builder graph rooted at `root`.
    pub fn resolve(&mut self, root: &TypeDef) -> Resolution {
        let mut resolution = Resolution {
            root: root.fully_qualified_name(),
            ..Resolution::default()
        };
        let mut path = Vec::new();
        self.walk(root, 0, &mut path, &mut resolution);
        resolution
    }

    fn walk(
        &mut self,
        def: &TypeDef,
        depth: usize,
        path: &mut Vec<String>,
        resolution: &mut Resolution,
    ) {
        let settings = self.settings();
        let fqn = def.fully_qualified_name();

        let occurrences = path.iter().filter(|p| **p == fqn).count();
        if occurrences >= settings.max_recursion_level {
            truncate(resolution, fqn, depth, TruncationReason::RecursionLevel);
            return;
        }

        let descendants = self.descendants_of(def);
        resolution.descendants.entry(fqn.clone()).or_insert_with(|| {
            descendants
                .iter()
                .map(TypeDef::fully_qualified_name)
                .collect()
        });

        let mut children = Vec::new();
        for holder in std::iter::once(def).chain(&descendants) {
            for property in &holder.properties {
                let kind = ContainerKind::of(&property.type_ref, self.definitions());
                let Some(target) = containers::unwrap(&property.type_ref, kind) else {
                    continue;
                };
                if let Some(nested) = self.buildables().get(&target.fully_qualified_name) {
                    children.push(nested.clone());
                }
            }
        }

        path.push(fqn);
        for child in &children {
            if depth + 1 > settings.max_nesting_depth {
                truncate(
                    resolution,
                    child.fully_qualified_name(),
                    depth + 1,
                    TruncationReason::NestingDepth,
                );
                continue;
            }
            self.walk(child, depth + 1, path, resolution);
        }
        path.pop();
    }
}

fn truncate(resolution: &mut Resolution, fqn: String, depth: usize, reason: TruncationReason) {
    debug!(fqn = %fqn, depth, ?reason, root = %resolution.root, "resolution truncated");
    resolution.truncated.push(Truncation { fqn, depth, reason });
}

#[cfg(test)]
mod tests {
    use fluentgen_model::{ClassRef, Property, TypeRef};

    use super::*;
    use crate::ResolverSettings;

    fn class(fqn: &str) -> TypeDef {
        TypeDef::new(Kind::Class, fqn)
    }

    fn shapes() -> BuilderContext {
        let mut ctx = BuilderContext::default();
        ctx.register_buildable(class("com.example.Shape").with_abstract());
        ctx.register_buildable(class("com.example.Circle").extending("com.example.Shape"));
        ctx.register_buildable(class("com.example.Square").extending("com.example.Shape"));
        ctx
    }

    fn names(defs: &[TypeDef]) -> Vec<String> {
        defs.iter().map(TypeDef::fully_qualified_name).collect()
    }

    #[test]
    fn test_descendants_in_registration_order() {
        let mut ctx = shapes();
        let shape = class("com.example.Shape");

        assert_eq!(
            names(&ctx.descendants_of(&shape)),
            ["com.example.Circle", "com.example.Square"]
        );
    }

    #[test]
    fn test_descendant_set_invariants() {
        let mut ctx = shapes();
        ctx.register_buildable(
            class("com.example.Polygon")
                .extending("com.example.Shape")
                .with_abstract(),
        );
        ctx.register_buildable(
            TypeDef::new(Kind::Interface, "com.example.Rounded").implementing("com.example.Shape"),
        );
        ctx.register_buildable(
            class("com.example.ShapeFluent")
                .extending("com.example.Shape")
                .with_attribute(AttributeKey::Generated, true),
        );

        let shape = ctx.buildables().get("com.example.Shape").cloned().unwrap();
        let found = ctx.descendants_of(&shape);
        for d in &found {
            assert_eq!(d.kind, Kind::Class);
            assert!(!d.is_abstract());
            assert!(!d.attributes.flag(AttributeKey::Generated));
            assert_ne!(d.fully_qualified_name(), "com.example.Shape");
            assert!(ctx.is_descendant(d, &shape));
        }
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_object_has_no_descendants() {
        let mut ctx = shapes();
        assert!(ctx.descendants_of(&TypeDef::object()).is_empty());
    }

    #[test]
    fn test_transitive_descendants() {
        let mut ctx = shapes();
        ctx.register_buildable(class("com.example.Ellipse").extending("com.example.Circle"));

        let shape = class("com.example.Shape");
        assert_eq!(
            names(&ctx.descendants_of(&shape)),
            [
                "com.example.Circle",
                "com.example.Square",
                "com.example.Ellipse"
            ]
        );
    }

    #[test]
    fn test_descendants_idempotent_and_cached() {
        let mut ctx = shapes();
        let shape = class("com.example.Shape");
        let first = ctx.descendants_of(&shape);

        // Registered after the first lookup: invisible until invalidated.
        ctx.register_buildable(class("com.example.Triangle").extending("com.example.Shape"));
        assert_eq!(ctx.descendants_of(&shape), first);

        ctx.invalidate();
        assert_eq!(ctx.descendants_of(&shape).len(), 3);
    }

    #[test]
    fn test_resolve_collects_nested_descendants() {
        let mut ctx = shapes();
        let drawing = ctx
            .register_buildable(class("com.example.Drawing").with_property(Property::new(
                "shapes",
                ClassRef::new("java.util.List").with_arguments([TypeRef::class("com.example.Shape")]),
            )))
            .clone();

        let resolution = ctx.resolve(&drawing);
        assert_eq!(resolution.root, "com.example.Drawing");
        assert_eq!(
            resolution.descendants_of("com.example.Shape"),
            Some(&["com.example.Circle".to_string(), "com.example.Square".to_string()][..])
        );
        assert!(!resolution.is_truncated());
    }

    #[test]
    fn test_mutual_references_terminate() {
        let mut ctx = BuilderContext::new(ResolverSettings {
            max_recursion_level: 2,
            max_nesting_depth: 10,
        });
        ctx.register_buildable(
            class("com.example.A").with_property(Property::new("b", TypeRef::class("com.example.B"))),
        );
        let b = ctx
            .register_buildable(
                class("com.example.B")
                    .with_property(Property::new("a", TypeRef::class("com.example.A"))),
            )
            .clone();

        let resolution = ctx.resolve(&b);
        assert_eq!(resolution.descendants.len(), 2);
        assert_eq!(
            resolution.truncated,
            [Truncation {
                fqn: "com.example.B".to_string(),
                depth: 4,
                reason: TruncationReason::RecursionLevel,
            }]
        );
    }

    #[test]
    fn test_nesting_depth_truncates() {
        let mut ctx = BuilderContext::new(ResolverSettings {
            max_recursion_level: 2,
            max_nesting_depth: 1,
        });
        let a = ctx
            .register_buildable(
                class("com.example.A")
                    .with_property(Property::new("b", TypeRef::class("com.example.B"))),
            )
            .clone();
        ctx.register_buildable(
            class("com.example.B").with_property(Property::new("c", TypeRef::class("com.example.C"))),
        );
        ctx.register_buildable(class("com.example.C"));

        let resolution = ctx.resolve(&a);
        assert!(resolution.descendants.contains_key("com.example.B"));
        assert!(!resolution.descendants.contains_key("com.example.C"));
        assert_eq!(resolution.truncated[0].reason, TruncationReason::NestingDepth);
        assert_eq!(resolution.truncated[0].depth, 2);
    }
}
