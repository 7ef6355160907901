//! # Type Descriptors — Static Shape Metadata
//!
//! A [`TypeDescriptor`] is everything the transformer needs to know about a
//! target type: its ordered fields, its optional constructor signature, and
//! whether it is an object or a collection.
//!
//! ## Declared Types
//!
//! Field and parameter types are [`TypeRef`]s with a textual form used by
//! schema documents:
//!
//! | Text          | Meaning                                  |
//! |---------------|------------------------------------------|
//! | `int`         | 64-bit integer (alias `integer`)         |
//! | `float`       | 64-bit float                             |
//! | `string`      | UTF-8 string                             |
//! | `bool`        | boolean (alias `boolean`)                |
//! | `Name`        | another registered type                  |
//! | `A\|B`        | union (parsed, but unsupported)          |
//! | `A&B`         | intersection (parsed, but unsupported)   |
//!
//! In documents a leading `?` marks the field or parameter nullable
//! (`?string`). Union and intersection types parse so that a schema can be
//! loaded and then rejected with a precise [`SchemaError::UnsupportedType`]
//! when it is described.
//!
//! ## Collections
//!
//! A collection-kind descriptor wraps a homogeneous ordered list. Its
//! constructor has exactly one (variadic) parameter whose type is the single
//! permitted element type. [`TypeDescriptor::element`] enforces that shape.

use std::fmt;
use std::str::FromStr;

use hydrate_core::{SchemaError, Value};
use serde::{Deserialize, Deserializer, Serialize};

use crate::instance::Target;

// ---------------------------------------------------------------------------
// ScalarKind
// ---------------------------------------------------------------------------

/// The four builtin leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// UTF-8 string.
    String,
    /// Boolean.
    Bool,
}

impl ScalarKind {
    /// All scalar kinds.
    pub const ALL: [ScalarKind; 4] = [
        ScalarKind::Int,
        ScalarKind::Float,
        ScalarKind::String,
        ScalarKind::Bool,
    ];

    /// Canonical name, as used in error reasons and schema documents.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
        }
    }

    /// Parse a canonical name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" | "integer" => Some(ScalarKind::Int),
            "float" => Some(ScalarKind::Float),
            "string" => Some(ScalarKind::String),
            "bool" | "boolean" => Some(ScalarKind::Bool),
            _ => None,
        }
    }

    /// True when `value`'s runtime kind is exactly this kind.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarKind::Int, Value::Int(_))
                | (ScalarKind::Float, Value::Float(_))
                | (ScalarKind::String, Value::String(_))
                | (ScalarKind::Bool, Value::Bool(_))
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TypeRef
// ---------------------------------------------------------------------------

/// A declared field or parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A builtin scalar.
    Scalar(ScalarKind),
    /// Another type, resolved by name through the registry.
    Named(String),
    /// `A|B`. Unsupported.
    Union(Vec<TypeRef>),
    /// `A&B`. Unsupported.
    Intersection(Vec<TypeRef>),
}

impl TypeRef {
    /// `int`.
    pub const INT: TypeRef = TypeRef::Scalar(ScalarKind::Int);
    /// `float`.
    pub const FLOAT: TypeRef = TypeRef::Scalar(ScalarKind::Float);
    /// `string`.
    pub const STRING: TypeRef = TypeRef::Scalar(ScalarKind::String);
    /// `bool`.
    pub const BOOL: TypeRef = TypeRef::Scalar(ScalarKind::Bool);

    /// A reference to another type by name.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// A reference to a Rust [`Target`] type.
    ///
    /// Only the name is recorded. `T` must be registered before a transform
    /// reaches the field, usually from the enclosing type's
    /// [`Target::register_dependencies`].
    pub fn of<T: Target>() -> Self {
        TypeRef::Named(T::NAME.to_string())
    }

    /// True for union and intersection types.
    pub fn is_composite(&self) -> bool {
        matches!(self, TypeRef::Union(_) | TypeRef::Intersection(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => f.write_str(kind.name()),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Union(members) => write_joined(f, members, "|"),
            TypeRef::Intersection(members) => write_joined(f, members, "&"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[TypeRef], sep: &str) -> fmt::Result {
    for (i, m) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{m}")?;
    }
    Ok(())
}

impl FromStr for TypeRef {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('|') {
            return parse_members(s, '|').map(TypeRef::Union);
        }
        if s.contains('&') {
            return parse_members(s, '&').map(TypeRef::Intersection);
        }
        parse_single(s)
    }
}

fn parse_members(s: &str, sep: char) -> Result<Vec<TypeRef>, SchemaError> {
    s.split(sep).map(|part| parse_single(part.trim())).collect()
}

fn parse_single(s: &str) -> Result<TypeRef, SchemaError> {
    let valid = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == ':' || c == '\\');
    if !valid {
        return Err(SchemaError::Document(format!("invalid type name '{s}'")));
    }
    Ok(ScalarKind::from_name(s).map_or_else(|| TypeRef::Named(s.to_string()), TypeRef::Scalar))
}

impl TryFrom<String> for TypeRef {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeRef> for String {
    fn from(t: TypeRef) -> Self {
        t.to_string()
    }
}

/// Split a document type string into its nullable flag and type.
fn parse_declared(text: Option<String>) -> Result<(Option<TypeRef>, bool), SchemaError> {
    match text {
        None => Ok((None, false)),
        Some(t) => match t.trim().strip_prefix('?') {
            Some(rest) => Ok((Some(rest.parse()?), true)),
            None => Ok((Some(t.parse()?), false)),
        },
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Deserialize a present key into `Some`, including an explicit `null`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// FieldSpec
// ---------------------------------------------------------------------------

/// One settable field of a target type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldDecl", into = "FieldDecl")]
pub struct FieldSpec {
    /// Field name; also the input mapping key.
    pub name: String,
    /// Declared type. `None` accepts any value, including null.
    pub ty: Option<TypeRef>,
    /// Whether null is a valid value.
    pub nullable: bool,
    /// Value used when the key is absent from the input.
    pub default: Option<Value>,
    /// Validated but never assigned to the built instance.
    pub excluded: bool,
}

impl FieldSpec {
    /// A required, non-nullable field of type `ty`.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            nullable: false,
            default: None,
            excluded: false,
        }
    }

    /// A field with no declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            nullable: false,
            default: None,
            excluded: false,
        }
    }

    /// Allow null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Use `value` when the key is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validate the field but never assign it.
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }
}

/// Wire form of [`FieldSpec`] in schema documents.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDecl {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    ty: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    nullable: bool,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    excluded: bool,
}

impl TryFrom<FieldDecl> for FieldSpec {
    type Error = SchemaError;

    fn try_from(decl: FieldDecl) -> Result<Self, Self::Error> {
        let (ty, marked_nullable) = parse_declared(decl.ty)?;
        Ok(Self {
            name: decl.name,
            ty,
            nullable: decl.nullable || marked_nullable,
            default: decl.default,
            excluded: decl.excluded,
        })
    }
}

impl From<FieldSpec> for FieldDecl {
    fn from(spec: FieldSpec) -> Self {
        Self {
            name: spec.name,
            ty: spec.ty.map(String::from),
            nullable: spec.nullable,
            default: spec.default,
            excluded: spec.excluded,
        }
    }
}

// ---------------------------------------------------------------------------
// Constructor
// ---------------------------------------------------------------------------

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParamDecl", into = "ParamDecl")]
pub struct ParamSpec {
    /// Parameter name; matched against field names.
    pub name: String,
    /// Declared type, if any.
    pub ty: Option<TypeRef>,
    /// Whether null is a valid argument.
    pub nullable: bool,
    /// Collects all remaining arguments.
    pub variadic: bool,
}

impl ParamSpec {
    /// A typed, non-nullable parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            nullable: false,
            variadic: false,
        }
    }

    /// A parameter with no declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            nullable: false,
            variadic: false,
        }
    }

    /// Allow null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as variadic.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamDecl {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    ty: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    nullable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    variadic: bool,
}

impl TryFrom<ParamDecl> for ParamSpec {
    type Error = SchemaError;

    fn try_from(decl: ParamDecl) -> Result<Self, Self::Error> {
        let (ty, marked_nullable) = parse_declared(decl.ty)?;
        Ok(Self {
            name: decl.name,
            ty,
            nullable: decl.nullable || marked_nullable,
            variadic: decl.variadic,
        })
    }
}

impl From<ParamSpec> for ParamDecl {
    fn from(spec: ParamSpec) -> Self {
        Self {
            name: spec.name,
            ty: spec.ty.map(String::from),
            nullable: spec.nullable,
            variadic: spec.variadic,
        }
    }
}

/// Ordered constructor signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstructorSpec {
    /// Parameters in declared order.
    pub params: Vec<ParamSpec>,
}

impl ConstructorSpec {
    /// A constructor with the given parameters.
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// A constructor taking no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// ---------------------------------------------------------------------------
// TypeDescriptor
// ---------------------------------------------------------------------------

/// Whether a type is an object or a homogeneous collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Built from a mapping, field by field.
    #[default]
    Object,
    /// Built from a sequence of one element type.
    Collection,
}

/// Complete static shape of one target type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDescriptor {
    /// Type name; the registry key.
    pub name: String,
    /// Object or collection.
    #[serde(default)]
    pub kind: TypeKind,
    /// Settable fields in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
    /// Constructor signature, if the type declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<ConstructorSpec>,
    /// For collections: build empty regardless of the validated items.
    #[serde(default, skip_serializing_if = "is_false")]
    pub suppressed: bool,
}

impl TypeDescriptor {
    /// An object type with no fields and no constructor.
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Object,
            fields: Vec::new(),
            constructor: None,
            suppressed: false,
        }
    }

    /// A collection type whose variadic constructor accepts `element` items.
    pub fn collection(name: impl Into<String>, element: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Collection,
            fields: Vec::new(),
            constructor: Some(ConstructorSpec::new(vec![
                ParamSpec::new("items", element).variadic()
            ])),
            suppressed: false,
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare the constructor.
    pub fn constructor(mut self, constructor: ConstructorSpec) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Build this collection empty regardless of input items.
    pub fn suppressed(mut self) -> Self {
        self.suppressed = true;
        self
    }

    /// True for collection-kind types.
    pub fn is_collection(&self) -> bool {
        self.kind == TypeKind::Collection
    }

    /// Look up a field by name.
    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reject union and intersection types on any field or constructor
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedType` naming the first offending
    /// member.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for field in &self.fields {
            if let Some(ty) = field.ty.as_ref().filter(|t| t.is_composite()) {
                return Err(SchemaError::UnsupportedType(format!(
                    "field {}.{} has polymorphic type {ty}",
                    self.name, field.name
                )));
            }
        }
        let params = self.constructor.iter().flat_map(|c| c.params.iter());
        for param in params {
            if let Some(ty) = param.ty.as_ref().filter(|t| t.is_composite()) {
                return Err(SchemaError::UnsupportedType(format!(
                    "constructor parameter {}::{} has polymorphic type {ty}",
                    self.name, param.name
                )));
            }
        }
        Ok(())
    }

    /// The single element parameter of a collection type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedType` unless the constructor has
    /// exactly one parameter with a concrete, non-composite type.
    pub fn element(&self) -> Result<(&ParamSpec, &TypeRef), SchemaError> {
        let malformed = || {
            SchemaError::UnsupportedType(format!(
                "collection {} must declare exactly one constructor parameter with a single element type",
                self.name
            ))
        };
        let ctor = self.constructor.as_ref().ok_or_else(malformed)?;
        let [param] = ctor.params.as_slice() else {
            return Err(malformed());
        };
        match &param.ty {
            Some(ty) if !ty.is_composite() => Ok((param, ty)),
            _ => Err(malformed()),
        }
    }
}
