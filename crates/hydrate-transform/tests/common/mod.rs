//! Target types shared by the transformer integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use hydrate_core::{SchemaError, Value};
use hydrate_schema::{
    Arguments, ConstructorSpec, FieldSpec, ParamSpec, Represent, SchemaRegistry, Slot, Target,
    TypeDescriptor, TypeRef,
};
use hydrate_transform::{TransformConfig, Transformer};

pub fn json(text: &str) -> Value {
    Value::from_json_str(text).expect("test JSON must parse")
}

fn mapping(entries: Vec<(&str, Value)>) -> Value {
    let map: BTreeMap<String, Value> = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    Value::Mapping(map)
}

fn unexpected(type_name: &str, field: &str) -> SchemaError {
    SchemaError::Construction {
        type_name: type_name.to_string(),
        reason: format!("unexpected field {field}"),
    }
}

/// A registry holding every fixture type.
pub fn registry() -> Arc<SchemaRegistry> {
    Arc::new(
        SchemaRegistry::new()
            .with::<FirstLevel>()
            .with::<SecondLevel>()
            .with::<ThirdLevel>()
            .with::<OptionalThirdLevel>()
            .with::<Tag>()
            .with::<Tags>()
            .with::<Basket>()
            .with::<Product>()
            .with::<SilencedTags>()
            .with::<Node>(),
    )
}

pub fn transformer() -> Transformer {
    Transformer::new(registry())
}

pub fn transformer_with(config: TransformConfig) -> Transformer {
    Transformer::with_config(registry(), config)
}

// ---------------------------------------------------------------------------
// Three nested levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirstLevel {
    pub name: String,
}

impl Represent for FirstLevel {
    fn represent(&self) -> Value {
        mapping(vec![("name", self.name.represent())])
    }
}

impl Target for FirstLevel {
    const NAME: &'static str = "FirstLevel";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME).field(FieldSpec::new("name", TypeRef::STRING))
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "name" => self.name = value.extract()?,
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecondLevel {
    pub name: String,
    pub level1: FirstLevel,
}

impl Represent for SecondLevel {
    fn represent(&self) -> Value {
        mapping(vec![
            ("name", self.name.represent()),
            ("level1", self.level1.represent()),
        ])
    }
}

impl Target for SecondLevel {
    const NAME: &'static str = "SecondLevel";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("name", TypeRef::STRING))
            .field(FieldSpec::new("level1", TypeRef::of::<FirstLevel>()))
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "name" => self.name = value.extract()?,
            "level1" => self.level1 = value.extract()?,
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThirdLevel {
    pub name: String,
    pub level2: SecondLevel,
}

impl Represent for ThirdLevel {
    fn represent(&self) -> Value {
        mapping(vec![
            ("name", self.name.represent()),
            ("level2", self.level2.represent()),
        ])
    }
}

impl Target for ThirdLevel {
    const NAME: &'static str = "ThirdLevel";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("name", TypeRef::STRING))
            .field(FieldSpec::new("level2", TypeRef::of::<SecondLevel>()))
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "name" => self.name = value.extract()?,
            "level2" => self.level2 = value.extract()?,
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}

/// `ThirdLevel` with a nullable top-level name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalThirdLevel {
    pub name: Option<String>,
    pub level2: SecondLevel,
}

impl Represent for OptionalThirdLevel {
    fn represent(&self) -> Value {
        mapping(vec![
            ("name", self.name.represent()),
            ("level2", self.level2.represent()),
        ])
    }
}

impl Target for OptionalThirdLevel {
    const NAME: &'static str = "OptionalThirdLevel";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("name", TypeRef::STRING).nullable())
            .field(FieldSpec::new("level2", TypeRef::of::<SecondLevel>()))
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "name" => self.name = value.extract()?,
            "level2" => self.level2 = value.extract()?,
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Built through its constructor only.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Represent for Tag {
    fn represent(&self) -> Value {
        mapping(vec![("name", self.name.represent())])
    }
}

impl Target for Tag {
    const NAME: &'static str = "Tag";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("name", TypeRef::STRING))
            .constructor(ConstructorSpec::new(vec![ParamSpec::new("name", TypeRef::STRING)]))
    }

    fn construct(mut args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self { name: args.next()? })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags(pub Vec<Tag>);

impl Represent for Tags {
    fn represent(&self) -> Value {
        Value::Sequence(self.0.iter().map(Represent::represent).collect())
    }
}

impl Target for Tags {
    const NAME: &'static str = "Tags";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection(Self::NAME, TypeRef::of::<Tag>())
    }

    fn construct(args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self(args.rest()?))
    }

    fn register_dependencies(registry: &SchemaRegistry) {
        registry.ensure_registered::<Tag>();
    }
}

/// A `Tags`-shaped collection whose constructor receives nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilencedTags {
    pub received: usize,
}

impl Represent for SilencedTags {
    fn represent(&self) -> Value {
        Value::Sequence(Vec::new())
    }
}

impl Target for SilencedTags {
    const NAME: &'static str = "SilencedTags";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection(Self::NAME, TypeRef::of::<Tag>()).suppressed()
    }

    fn construct(args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self {
            received: args.len(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    pub owner: String,
    pub tags: Tags,
}

impl Represent for Basket {
    fn represent(&self) -> Value {
        mapping(vec![
            ("owner", self.owner.represent()),
            ("tags", self.tags.represent()),
        ])
    }
}

impl Target for Basket {
    const NAME: &'static str = "Basket";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("owner", TypeRef::STRING))
            .field(FieldSpec::new("tags", TypeRef::of::<Tags>()))
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "owner" => self.owner = value.extract()?,
            "tags" => self.tags = value.extract()?,
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Defaults, nullability, exclusion, untyped fields
// ---------------------------------------------------------------------------

/// `audited` is excluded: it is validated but never reaches `assign`,
/// which rejects it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub title: String,
    pub price: f64,
    pub note: Option<String>,
    pub quantity: i64,
    pub extra: Value,
}

impl Represent for Product {
    fn represent(&self) -> Value {
        mapping(vec![
            ("title", self.title.represent()),
            ("price", self.price.represent()),
            ("note", self.note.represent()),
            ("quantity", self.quantity.represent()),
            ("extra", self.extra.clone()),
        ])
    }
}

impl Target for Product {
    const NAME: &'static str = "Product";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("title", TypeRef::STRING))
            .field(FieldSpec::new("price", TypeRef::FLOAT))
            .field(
                FieldSpec::new("note", TypeRef::STRING)
                    .nullable()
                    .with_default(Value::Null),
            )
            .field(FieldSpec::new("quantity", TypeRef::INT).with_default(1i64))
            .field(
                FieldSpec::new("audited", TypeRef::BOOL)
                    .with_default(false)
                    .excluded(),
            )
            .field(FieldSpec::untyped("extra").with_default(Value::Null))
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "title" => self.title = value.extract()?,
            "price" => self.price = value.extract()?,
            "note" => self.note = value.extract()?,
            "quantity" => self.quantity = value.extract()?,
            "extra" => self.extra = value.extract()?,
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Self-referencing type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub next: Option<Box<Node>>,
}

impl Represent for Node {
    fn represent(&self) -> Value {
        let next = match &self.next {
            Some(node) => node.represent(),
            None => Value::Null,
        };
        mapping(vec![("name", self.name.represent()), ("next", next)])
    }
}

impl Target for Node {
    const NAME: &'static str = "Node";

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(Self::NAME)
            .field(FieldSpec::new("name", TypeRef::STRING))
            .field(FieldSpec::new("next", TypeRef::of::<Node>()).nullable())
    }

    fn construct(_args: Arguments) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        match field {
            "name" => self.name = value.extract()?,
            "next" => self.next = value.extract::<Option<Node>>()?.map(Box::new),
            other => return Err(unexpected(Self::NAME, other)),
        }
        Ok(())
    }
}
