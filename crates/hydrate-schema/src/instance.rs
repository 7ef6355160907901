//! # Instances — Building Typed Values
//!
//! The transformer validates input into [`Slot`]s (a scalar [`Value`] or a
//! boxed, already-built [`Instance`]) and hands them to a type's builder as
//! an [`Assembly`]: positional constructor [`Arguments`] plus every
//! finalized field. One code path serves every type:
//!
//! 1. `construct(arguments)`; the argument list is empty when the type
//!    declares no constructor or a zero-parameter one;
//! 2. `assign(field, slot)` for each finalized field, in declared order,
//!    including fields that were also passed to the constructor.
//!
//! Rust types take part by implementing [`Target`]. Slots are converted
//! back into Rust values with [`FromSlot`], which is implemented for the
//! scalar types, [`Value`], `Option<T>` (null becomes `None`) and every
//! `Target`.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use hydrate_core::{SchemaError, Value};

use crate::descriptor::TypeDescriptor;
use crate::registry::SchemaRegistry;

// ---------------------------------------------------------------------------
// Represent / Instance
// ---------------------------------------------------------------------------

/// Field-by-field representation of a built value as an input tree.
///
/// Re-transforming the representation of a successfully built instance
/// against the same type succeeds.
pub trait Represent {
    /// The value tree this instance was (or could have been) built from.
    fn represent(&self) -> Value;
}

impl Represent for Value {
    fn represent(&self) -> Value {
        self.clone()
    }
}

impl Represent for String {
    fn represent(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Represent for i64 {
    fn represent(&self) -> Value {
        Value::Int(*self)
    }
}

impl Represent for f64 {
    fn represent(&self) -> Value {
        Value::Float(*self)
    }
}

impl Represent for bool {
    fn represent(&self) -> Value {
        Value::Bool(*self)
    }
}

impl<T: Represent> Represent for Option<T> {
    fn represent(&self) -> Value {
        self.as_ref().map_or(Value::Null, Represent::represent)
    }
}

impl<T: Represent> Represent for Vec<T> {
    fn represent(&self) -> Value {
        Value::Sequence(self.iter().map(Represent::represent).collect())
    }
}

/// A built value with its concrete type erased.
pub trait Instance: Represent + fmt::Debug + Send + Sync + 'static {
    /// Clone behind the box.
    fn clone_instance(&self) -> Box<dyn Instance>;
    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
    /// Convert into `Any` for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    /// Rust type name, for diagnostics.
    fn rust_type_name(&self) -> &'static str;
}

impl<T> Instance for T
where
    T: Represent + Clone + fmt::Debug + Send + Sync + 'static,
{
    fn clone_instance(&self) -> Box<dyn Instance> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl Clone for Box<dyn Instance> {
    fn clone(&self) -> Self {
        (**self).clone_instance()
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// A validated field value awaiting assignment.
#[derive(Debug, Clone)]
pub enum Slot {
    /// A scalar, null, or untyped value.
    Value(Value),
    /// A built nested object or collection.
    Instance(Box<dyn Instance>),
}

impl Slot {
    /// A null slot.
    pub fn null() -> Self {
        Slot::Value(Value::Null)
    }

    /// True for a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Slot::Value(Value::Null))
    }

    /// Representation as an input tree.
    pub fn represent(&self) -> Value {
        match self {
            Slot::Value(v) => v.clone(),
            Slot::Instance(i) => i.represent(),
        }
    }

    /// Borrow a built instance as `T`, if it is one.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Slot::Instance(i) => i.as_any().downcast_ref::<T>(),
            Slot::Value(_) => None,
        }
    }

    /// Convert into a Rust value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SlotMismatch` if the slot does not hold a `T`.
    pub fn extract<T: FromSlot>(self) -> Result<T, SchemaError> {
        T::from_slot(self)
    }

    fn kind_label(&self) -> String {
        match self {
            Slot::Value(v) => v.type_name().to_string(),
            Slot::Instance(i) => i.rust_type_name().to_string(),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Value(value)
    }
}

// ---------------------------------------------------------------------------
// FromSlot
// ---------------------------------------------------------------------------

/// Conversion from a validated slot into a Rust value.
pub trait FromSlot: Sized {
    /// Perform the conversion.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SlotMismatch` when the slot holds another kind.
    fn from_slot(slot: Slot) -> Result<Self, SchemaError>;
}

fn mismatch(expected: &str, slot: &Slot) -> SchemaError {
    SchemaError::SlotMismatch {
        expected: expected.to_string(),
        found: slot.kind_label(),
    }
}

macro_rules! scalar_from_slot {
    ($ty:ty, $variant:ident) => {
        impl FromSlot for $ty {
            fn from_slot(slot: Slot) -> Result<Self, SchemaError> {
                match slot {
                    Slot::Value(Value::$variant(v)) => Ok(v),
                    other => Err(mismatch(stringify!($ty), &other)),
                }
            }
        }
    };
}

scalar_from_slot!(String, String);
scalar_from_slot!(i64, Int);
scalar_from_slot!(f64, Float);
scalar_from_slot!(bool, Bool);

impl FromSlot for Value {
    fn from_slot(slot: Slot) -> Result<Self, SchemaError> {
        Ok(slot.represent())
    }
}

impl FromSlot for Slot {
    fn from_slot(slot: Slot) -> Result<Self, SchemaError> {
        Ok(slot)
    }
}

impl<T: FromSlot> FromSlot for Option<T> {
    fn from_slot(slot: Slot) -> Result<Self, SchemaError> {
        if slot.is_null() {
            Ok(None)
        } else {
            T::from_slot(slot).map(Some)
        }
    }
}

impl<T: Target> FromSlot for T {
    fn from_slot(slot: Slot) -> Result<Self, SchemaError> {
        match slot {
            Slot::Instance(boxed) => {
                let found = boxed.rust_type_name();
                boxed
                    .into_any()
                    .downcast::<T>()
                    .map(|b| *b)
                    .map_err(|_| SchemaError::SlotMismatch {
                        expected: T::NAME.to_string(),
                        found: found.to_string(),
                    })
            }
            other => Err(mismatch(T::NAME, &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Arguments / Assembly
// ---------------------------------------------------------------------------

/// Positional constructor arguments, each tagged with its parameter name.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    owner: String,
    entries: VecDeque<(String, Slot)>,
}

impl Arguments {
    /// Empty argument list for a constructor of `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: VecDeque::new(),
        }
    }

    /// Append an argument.
    pub fn push(&mut self, name: impl Into<String>, slot: Slot) {
        self.entries.push_back((name.into(), slot));
    }

    /// Name of the type being constructed.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Number of remaining arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no arguments remain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameter names of the remaining arguments, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Take the next positional argument.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Construction` when no argument remains, or
    /// `SchemaError::SlotMismatch` when it is not a `T`.
    pub fn next<T: FromSlot>(&mut self) -> Result<T, SchemaError> {
        let (_, slot) = self.entries.pop_front().ok_or_else(|| SchemaError::Construction {
            type_name: self.owner.clone(),
            reason: "constructor called with too few arguments".to_string(),
        })?;
        T::from_slot(slot)
    }

    /// Take every remaining argument, as for a variadic parameter.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SlotMismatch` for the first argument that is
    /// not a `T`.
    pub fn rest<T: FromSlot>(self) -> Result<Vec<T>, SchemaError> {
        self.entries.into_iter().map(|(_, slot)| T::from_slot(slot)).collect()
    }

    /// The raw remaining slots.
    pub fn into_slots(self) -> Vec<Slot> {
        self.entries.into_iter().map(|(_, slot)| slot).collect()
    }
}

/// Everything needed to build one instance.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Constructor arguments in declared parameter order.
    pub arguments: Arguments,
    /// Finalized fields in declared order. Excluded fields never appear.
    pub fields: Vec<(String, Slot)>,
}

/// Type-erased instance builder stored in the registry.
pub type Builder = Arc<dyn Fn(Assembly) -> Result<Box<dyn Instance>, SchemaError> + Send + Sync>;

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// A Rust type that can be built from validated input.
///
/// # Example
///
/// ```
/// use hydrate_core::SchemaError;
/// use hydrate_schema::{Arguments, FieldSpec, Represent, Slot, Target, TypeDescriptor, TypeRef};
/// use hydrate_core::Value;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Tag {
///     name: String,
/// }
///
/// impl Represent for Tag {
///     fn represent(&self) -> Value {
///         Value::Mapping([("name".to_string(), self.name.represent())].into())
///     }
/// }
///
/// impl Target for Tag {
///     const NAME: &'static str = "Tag";
///
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::object(Self::NAME).field(FieldSpec::new("name", TypeRef::STRING))
///     }
///
///     fn construct(_args: Arguments) -> Result<Self, SchemaError> {
///         Ok(Self::default())
///     }
///
///     fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
///         if field == "name" {
///             self.name = value.extract()?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Target: Instance + Sized {
    /// Registry key; must equal `descriptor().name`.
    const NAME: &'static str;

    /// Static shape of this type.
    fn descriptor() -> TypeDescriptor;

    /// Create the instance from positional constructor arguments.
    ///
    /// `args` is empty when the descriptor declares no constructor or a
    /// zero-parameter one; the type then starts from its default state.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if the arguments cannot be converted.
    fn construct(args: Arguments) -> Result<Self, SchemaError>;

    /// Assign one finalized field after construction.
    ///
    /// Types whose state is fully set by `construct` can keep the default,
    /// which ignores the value.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if the value cannot be converted.
    fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
        let _ = (field, value);
        Ok(())
    }

    /// Register the named types this type's fields refer to.
    ///
    /// Called by [`SchemaRegistry::register`] right after `Self` is
    /// registered. Nested types are resolved by name at transform time, so
    /// a `TypeRef::of::<U>()` field fails with `UnsupportedType` unless `U`
    /// is registered here or by the caller. Use
    /// [`SchemaRegistry::ensure_registered`] so that cyclic references
    /// terminate.
    fn register_dependencies(registry: &SchemaRegistry) {
        let _ = registry;
    }
}

/// Builder that runs `T::construct` followed by `T::assign` per field.
pub fn typed_builder<T: Target>() -> Builder {
    Arc::new(build_typed::<T>)
}

fn build_typed<T: Target>(assembly: Assembly) -> Result<Box<dyn Instance>, SchemaError> {
    let Assembly { arguments, fields } = assembly;
    let mut instance = T::construct(arguments)?;
    for (name, slot) in fields {
        instance.assign(&name, slot)?;
    }
    Ok(Box::new(instance))
}
