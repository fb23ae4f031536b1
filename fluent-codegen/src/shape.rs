//! Builder shape generation.
//!
//! A [`BuilderShape`] is the operation contract of one generated builder:
//! for every property of an expanded definition, the accessor and mutator
//! operations the builder exposes. Operations are chosen from the property's
//! shape (single, sequence, map, polymorphic single) and from whether its
//! nested type is buildable, never from its name.

use std::fmt;

use fluentgen_core::{capitalize, singularize};
use fluentgen_model::{AttributeKey, ClassRef, Property, TypeDef, TypeRef};
use serde::Serialize;

use crate::{
    BuilderContext,
    containers::{self, ContainerKind},
};

/// Condition under which a builder operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Failure {
    IndexOutOfRange,
    Empty,
    NoMatch,
    Unset,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::IndexOutOfRange => write!(f, "index out of range"),
            Failure::Empty => write!(f, "empty"),
            Failure::NoMatch => write!(f, "no match"),
            Failure::Unset => write!(f, "unset"),
        }
    }
}

/// One builder operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub name: String,
    /// Parameters as `name: Type`.
    pub params: Vec<String>,
    pub returns: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Operation {
    fn new(name: impl Into<String>, returns: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: returns.into(),
            failure: None,
        }
    }

    fn param(mut self, name: &str, ty: impl fmt::Display) -> Self {
        self.params.push(format!("{}: {}", name, ty));
        self
    }

    fn fails(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) -> {}", self.name, self.params.join(", "), self.returns)?;
        if let Some(failure) = self.failure {
            write!(f, " fails: {}", failure)?;
        }
        Ok(())
    }
}

/// Shape of a property as seen by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Single,
    Sequence,
    Map,
    /// A single-valued property with descendant variants.
    Polymorphic,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::Single => write!(f, "single"),
            ContractKind::Sequence => write!(f, "sequence"),
            ContractKind::Map => write!(f, "map"),
            ContractKind::Polymorphic => write!(f, "polymorphic"),
        }
    }
}

/// One entry of a polymorphic property's variant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: String,
    pub type_ref: String,
    pub operations: Vec<Operation>,
}

/// Operations generated for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyContract {
    pub property: String,
    pub type_ref: String,
    pub kind: ContractKind,
    pub buildable: bool,
    /// Field the operations write into.
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
    pub operations: Vec<Operation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

impl PropertyContract {
    /// Whether the property narrows another one.
    pub fn is_synthetic(&self) -> bool {
        self.property != self.target
    }

    /// Find an operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

/// Operation contract of one generated builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderShape {
    pub type_name: String,
    pub builder_name: String,
    /// The type gets an `edit()` entry point.
    pub editable: bool,
    /// `build()` validates the instance.
    pub validation: bool,
    pub properties: Vec<PropertyContract>,
}

impl BuilderShape {
    pub fn property(&self, name: &str) -> Option<&PropertyContract> {
        self.properties.iter().find(|p| p.property == name)
    }
}

impl fmt::Display for BuilderShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.builder_name, self.type_name)?;
        let mut options = Vec::new();
        if self.editable {
            options.push(AttributeKey::EditableEnabled.as_str());
        }
        if self.validation {
            options.push(AttributeKey::ValidationEnabled.as_str());
        }
        if !options.is_empty() {
            write!(f, " [{}]", options.join(", "))?;
        }
        writeln!(f)?;

        for contract in &self.properties {
            write!(
                f,
                "  {}: {} ({}",
                contract.property, contract.type_ref, contract.kind
            )?;
            if contract.is_synthetic() {
                write!(f, " of {}", contract.target)?;
            }
            write!(f, ")")?;
            if let Some(init) = &contract.init {
                write!(f, " = new {}", init)?;
            }
            writeln!(f)?;
            for op in &contract.operations {
                writeln!(f, "    {}", op)?;
            }
            for variant in &contract.variants {
                writeln!(f, "    variant {}: {}", variant.name, variant.type_ref)?;
                for op in &variant.operations {
                    writeln!(f, "      {}", op)?;
                }
            }
        }
        Ok(())
    }
}

/// What a builder knows about the type a property nests.
struct Nesting {
    /// The nested type has a builder.
    buildable: bool,
    /// The nested builder can create new instances.
    constructible: bool,
    builder: String,
}

impl BuilderContext {
    /// Derive the builder contract for an expanded definition.
    pub fn shape_of(&self, def: &TypeDef) -> BuilderShape {
        let mut properties = Vec::new();

        for property in &def.properties {
            let kind = ContainerKind::of(&property.type_ref, self.definitions());
            match (property.descendant_of(), kind) {
                (Some(target), ContainerKind::Sequence) => {
                    properties.push(self.synthetic_sequence(property, target))
                }
                (Some(target), ContainerKind::Map) => {
                    properties.push(self.synthetic_map(property, target))
                }
                // Single-valued substitutes live in their original's variant table.
                (Some(_), _) => {}
                (None, ContainerKind::Sequence) => properties.push(self.sequence(property)),
                (None, ContainerKind::Map) => properties.push(self.map(property)),
                (None, ContainerKind::Single | ContainerKind::Other) => {
                    properties.push(self.single(property, def))
                }
            }
        }

        BuilderShape {
            type_name: def.fully_qualified_name(),
            builder_name: format!("{}Builder", def.name),
            editable: def.attributes.flag(AttributeKey::EditableEnabled),
            validation: def.attributes.flag(AttributeKey::ValidationEnabled),
            properties,
        }
    }

    fn nesting(&self, property: &Property, nested: Option<&ClassRef>) -> Nesting {
        let forced = property.attributes.flag(AttributeKey::BuildableEnabled);
        let def = nested.and_then(|c| self.buildables().get(&c.fully_qualified_name));
        Nesting {
            buildable: nested.is_some() && (forced || def.is_some()),
            constructible: match def {
                Some(def) => !def.is_abstract(),
                None => forced && nested.is_some(),
            },
            builder: format!(
                "Nested<{}Builder>",
                nested.map(ClassRef::name).unwrap_or_default()
            ),
        }
    }

    fn single(&self, property: &Property, def: &TypeDef) -> PropertyContract {
        let name = &property.name;
        let x = property.name_capitalized();
        let ty = property.type_ref.to_string();
        // Arrays and non-class types never nest a builder.
        let nesting = self.nesting(
            property,
            containers::unwrap(&property.type_ref, ContainerKind::Single),
        );

        let mut operations = vec![
            Operation::new(format!("with{x}"), "Self").param(name, &ty),
            Operation::new(format!("has{x}"), "bool"),
            Operation::new(format!("get{x}"), &ty),
        ];
        if nesting.buildable {
            operations.push(Operation::new(format!("build{x}"), &ty));
        }
        if nesting.constructible {
            let nested = &nesting.builder;
            operations.extend([
                Operation::new(format!("withNew{x}"), nested),
                Operation::new(format!("withNew{x}Like"), nested).param("item", &ty),
                Operation::new(format!("edit{x}"), nested).fails(Failure::Unset),
                Operation::new(format!("editOrNew{x}"), nested),
                Operation::new(format!("editOrNew{x}Like"), nested).param("item", &ty),
            ]);
        }

        let variants: Vec<Variant> = def
            .properties
            .iter()
            .filter(|p| p.descendant_of() == Some(name.as_str()))
            .filter(|p| ContainerKind::of(&p.type_ref, self.definitions()) == ContainerKind::Single)
            .map(|p| self.variant(p))
            .collect();

        PropertyContract {
            property: name.clone(),
            type_ref: ty,
            kind: if variants.is_empty() {
                ContractKind::Single
            } else {
                ContractKind::Polymorphic
            },
            buildable: nesting.buildable,
            target: name.clone(),
            init: None,
            operations,
            variants,
        }
    }

    fn variant(&self, property: &Property) -> Variant {
        let v = property.name_capitalized();
        let ty = property.type_ref.to_string();
        let nested = self.nesting(property, property.type_ref.as_class()).builder;
        Variant {
            name: property.name.clone(),
            type_ref: ty.clone(),
            operations: vec![
                Operation::new(format!("with{v}"), "Self").param(&property.name, &ty),
                Operation::new(format!("withNew{v}"), &nested),
                Operation::new(format!("withNew{v}Like"), &nested).param("item", &ty),
            ],
        }
    }

    fn sequence(&self, property: &Property) -> PropertyContract {
        let name = &property.name;
        let x = property.name_capitalized();
        let y = capitalize(&singularize(name));
        let ty = property.type_ref.to_string();
        let element = type_argument(&property.type_ref, 0);
        let nesting = self.nesting(
            property,
            containers::unwrap(&property.type_ref, ContainerKind::Sequence),
        );
        let get = if nesting.buildable { "build" } else { "get" };
        let predicate = format!("Predicate<{}>", element);
        let items = format!("{}...", element);
        let all = format!("Collection<{}>", element);

        let mut operations = vec![
            Operation::new(format!("with{x}"), "Self").param(name, &ty),
            Operation::new(format!("with{x}"), "Self").param("items", &items),
            Operation::new(format!("addTo{x}"), "Self")
                .param("index", "int")
                .param("item", &element),
            Operation::new(format!("setTo{x}"), "Self")
                .param("index", "int")
                .param("item", &element),
            Operation::new(format!("addTo{x}"), "Self").param("items", &items),
            Operation::new(format!("addAllTo{x}"), "Self").param("items", &all),
            Operation::new(format!("removeFrom{x}"), "Self").param("items", &items),
            Operation::new(format!("removeAllFrom{x}"), "Self").param("items", &all),
            Operation::new(format!("{get}{x}"), &ty),
            Operation::new(format!("{get}{y}"), &element)
                .param("index", "int")
                .fails(Failure::IndexOutOfRange),
            Operation::new(format!("{get}First{y}"), &element).fails(Failure::Empty),
            Operation::new(format!("{get}Last{y}"), &element).fails(Failure::Empty),
            Operation::new(format!("{get}Matching{y}"), format!("Option<{}>", element))
                .param("predicate", &predicate),
            Operation::new(format!("hasMatching{y}"), "bool").param("predicate", &predicate),
            Operation::new(format!("has{x}"), "bool"),
        ];
        if nesting.constructible {
            let nested = &nesting.builder;
            operations.extend([
                Operation::new(format!("addNew{y}"), nested),
                Operation::new(format!("addNew{y}Like"), nested).param("item", &element),
                Operation::new(format!("setNew{y}Like"), nested)
                    .param("index", "int")
                    .param("item", &element),
                Operation::new(format!("edit{y}"), nested)
                    .param("index", "int")
                    .fails(Failure::IndexOutOfRange),
                Operation::new(format!("editFirst{y}"), nested).fails(Failure::Empty),
                Operation::new(format!("editLast{y}"), nested).fails(Failure::Empty),
                Operation::new(format!("editMatching{y}"), nested)
                    .param("predicate", &predicate)
                    .fails(Failure::NoMatch),
            ]);
        }

        PropertyContract {
            property: name.clone(),
            type_ref: ty,
            kind: ContractKind::Sequence,
            buildable: nesting.buildable,
            target: name.clone(),
            init: init_of(property),
            operations,
            variants: Vec::new(),
        }
    }

    fn synthetic_sequence(&self, property: &Property, target: &str) -> PropertyContract {
        let name = &property.name;
        let x = property.name_capitalized();
        let y = capitalize(&singularize(name));
        let element = type_argument(&property.type_ref, 0);
        let nesting = self.nesting(
            property,
            containers::unwrap(&property.type_ref, ContainerKind::Sequence),
        );
        let items = format!("{}...", element);
        let all = format!("Collection<{}>", element);

        let mut operations = vec![
            Operation::new(format!("addTo{x}"), "Self")
                .param("index", "int")
                .param("item", &element),
            Operation::new(format!("setTo{x}"), "Self")
                .param("index", "int")
                .param("item", &element),
            Operation::new(format!("addTo{x}"), "Self").param("items", &items),
            Operation::new(format!("addAllTo{x}"), "Self").param("items", &all),
            Operation::new(format!("removeFrom{x}"), "Self").param("items", &items),
            Operation::new(format!("removeAllFrom{x}"), "Self").param("items", &all),
        ];
        if nesting.constructible {
            let nested = &nesting.builder;
            operations.extend([
                Operation::new(format!("addNew{y}"), nested),
                Operation::new(format!("addNew{y}Like"), nested).param("item", &element),
                Operation::new(format!("setNew{y}Like"), nested)
                    .param("index", "int")
                    .param("item", &element),
            ]);
        }

        PropertyContract {
            property: name.clone(),
            type_ref: property.type_ref.to_string(),
            kind: ContractKind::Sequence,
            buildable: nesting.buildable,
            target: target.to_string(),
            init: init_of(property),
            operations,
            variants: Vec::new(),
        }
    }

    fn map(&self, property: &Property) -> PropertyContract {
        let name = &property.name;
        let x = property.name_capitalized();
        let ty = property.type_ref.to_string();
        let nesting = self.nesting(
            property,
            containers::unwrap(&property.type_ref, ContainerKind::Map),
        );

        let mut operations = vec![Operation::new(format!("with{x}"), "Self").param(name, &ty)];
        operations.extend(map_mutators(property));
        operations.extend([
            Operation::new(format!("get{x}"), &ty),
            Operation::new(format!("has{x}"), "bool"),
        ]);

        PropertyContract {
            property: name.clone(),
            type_ref: ty,
            kind: ContractKind::Map,
            buildable: nesting.buildable,
            target: name.clone(),
            init: init_of(property),
            operations,
            variants: Vec::new(),
        }
    }

    fn synthetic_map(&self, property: &Property, target: &str) -> PropertyContract {
        let nesting = self.nesting(
            property,
            containers::unwrap(&property.type_ref, ContainerKind::Map),
        );
        PropertyContract {
            property: property.name.clone(),
            type_ref: property.type_ref.to_string(),
            kind: ContractKind::Map,
            buildable: nesting.buildable,
            target: target.to_string(),
            init: init_of(property),
            operations: map_mutators(property),
            variants: Vec::new(),
        }
    }
}

fn map_mutators(property: &Property) -> Vec<Operation> {
    let x = property.name_capitalized();
    let ty = property.type_ref.to_string();
    let key = type_argument(&property.type_ref, 0);
    let value = type_argument(&property.type_ref, 1);
    vec![
        Operation::new(format!("addTo{x}"), "Self")
            .param("key", &key)
            .param("value", &value),
        Operation::new(format!("addTo{x}"), "Self").param("map", &ty),
        Operation::new(format!("removeFrom{x}"), "Self").param("key", &key),
        Operation::new(format!("removeFrom{x}"), "Self").param("map", &ty),
    ]
}

fn type_argument(type_ref: &TypeRef, index: usize) -> String {
    type_ref
        .as_class()
        .and_then(|c| c.arguments.get(index))
        .map(TypeRef::to_string)
        .unwrap_or_default()
}

fn init_of(property: &Property) -> Option<String> {
    property
        .attributes
        .text(AttributeKey::Init)
        .map(str::to_string)
}
