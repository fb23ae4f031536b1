//! Container classification for property types.

use fluentgen_model::{ClassRef, Kind, TypeDef, TypeLookup, TypeRef};
use serde::Serialize;

const COLLECTION: &str = "java.util.Collection";
const MAP: &str = "java.util.Map";

const SEQUENCES: &[&str] = &[
    "java.lang.Iterable",
    "java.util.Collection",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.SortedSet",
    "java.util.NavigableSet",
    "java.util.TreeSet",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.ArrayDeque",
];

const MAPS: &[&str] = &[
    "java.util.Map",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.SortedMap",
    "java.util.NavigableMap",
    "java.util.TreeMap",
];

/// How a property type is held by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// A collection with exactly one type argument.
    Sequence,
    /// A map with exactly two type arguments.
    Map,
    /// A plain class reference.
    Single,
    /// Primitives, void, wildcards, type parameters, arrays and raw containers.
    Other,
}

impl ContainerKind {
    /// Classify a type reference.
    ///
    /// Known `java.util` names are recognized directly; other classes are
    /// recognized through their supertypes when `lookup` knows them.
    pub fn of(type_ref: &TypeRef, lookup: &impl TypeLookup) -> Self {
        if type_ref.dimensions() > 0 {
            return ContainerKind::Other;
        }
        let Some(class_ref) = type_ref.as_class() else {
            return ContainerKind::Other;
        };

        let arity = class_ref.arguments.len();
        if is_sequence(class_ref, lookup) {
            if arity == 1 {
                ContainerKind::Sequence
            } else {
                ContainerKind::Other
            }
        } else if is_map(class_ref, lookup) {
            if arity == 2 {
                ContainerKind::Map
            } else {
                ContainerKind::Other
            }
        } else {
            ContainerKind::Single
        }
    }
}

fn is_sequence(class_ref: &ClassRef, lookup: &impl TypeLookup) -> bool {
    SEQUENCES.contains(&class_ref.fully_qualified_name.as_str())
        || extends_known(class_ref, COLLECTION, lookup)
}

fn is_map(class_ref: &ClassRef, lookup: &impl TypeLookup) -> bool {
    MAPS.contains(&class_ref.fully_qualified_name.as_str()) || extends_known(class_ref, MAP, lookup)
}

fn extends_known(class_ref: &ClassRef, target: &str, lookup: &impl TypeLookup) -> bool {
    let Some(def) = lookup.lookup(&class_ref.fully_qualified_name) else {
        return false;
    };
    TypeDef::new(Kind::Interface, target).is_assignable_from(def, lookup)
}

/// The type argument a builder nests: the element of a sequence, the value
/// of a map, or the reference itself.
///
/// Arrays are never nested, at the top level or as a type argument.
pub fn unwrap(type_ref: &TypeRef, kind: ContainerKind) -> Option<&ClassRef> {
    let class_ref = type_ref.as_class()?;
    let nested = match kind {
        ContainerKind::Sequence => class_ref.arguments.first()?.as_class()?,
        ContainerKind::Map => class_ref.arguments.get(1)?.as_class()?,
        ContainerKind::Single => class_ref,
        ContainerKind::Other => return None,
    };
    (nested.dimensions == 0).then_some(nested)
}

/// Concrete container a sequence or map property starts with.
pub fn default_init(class_ref: &ClassRef, kind: ContainerKind) -> Option<&'static str> {
    let fqn = class_ref.fully_qualified_name.as_str();
    match kind {
        ContainerKind::Sequence => Some(match fqn {
            "java.util.LinkedList" => "java.util.LinkedList",
            "java.util.HashSet" => "java.util.HashSet",
            "java.util.SortedSet" | "java.util.NavigableSet" | "java.util.TreeSet" => {
                "java.util.TreeSet"
            }
            "java.util.Set" | "java.util.LinkedHashSet" => "java.util.LinkedHashSet",
            "java.util.Queue" | "java.util.Deque" | "java.util.ArrayDeque" => {
                "java.util.ArrayDeque"
            }
            _ => "java.util.ArrayList",
        }),
        ContainerKind::Map => Some(match fqn {
            "java.util.HashMap" => "java.util.HashMap",
            "java.util.SortedMap" | "java.util.NavigableMap" | "java.util.TreeMap" => {
                "java.util.TreeMap"
            }
            _ => "java.util.LinkedHashMap",
        }),
        ContainerKind::Single | ContainerKind::Other => None,
    }
}
