//! # Records — Instances of Document-Defined Types
//!
//! Types loaded from a schema document have no Rust struct behind them.
//! Their instances are [`Record`]s (object kind: one slot per assigned
//! field, in declared order) and [`RecordList`]s (collection kind: the
//! validated items in input order).

use std::collections::BTreeMap;
use std::sync::Arc;

use hydrate_core::{SchemaError, Value};

use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::instance::{Assembly, Builder, Instance, Represent, Slot};

/// A built instance of a document-defined object type.
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Slot)>,
}

impl Record {
    /// An empty record of `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Name of the type this record was built as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Assign a field, overwriting any previous value.
    pub fn set(&mut self, field: impl Into<String>, slot: Slot) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = slot,
            None => self.fields.push((field, slot)),
        }
    }

    /// The slot assigned to `field`.
    pub fn get(&self, field: &str) -> Option<&Slot> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, slot)| slot)
    }

    /// Assigned fields in assignment order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.fields.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field was assigned.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Represent for Record {
    fn represent(&self) -> Value {
        let map: BTreeMap<String, Value> = self
            .fields
            .iter()
            .map(|(name, slot)| (name.clone(), slot.represent()))
            .collect();
        Value::Mapping(map)
    }
}

/// A built instance of a document-defined collection type.
#[derive(Debug, Clone)]
pub struct RecordList {
    type_name: String,
    items: Vec<Slot>,
}

impl RecordList {
    /// A list of `items` built as `type_name`.
    pub fn new(type_name: impl Into<String>, items: Vec<Slot>) -> Self {
        Self {
            type_name: type_name.into(),
            items,
        }
    }

    /// Name of the type this list was built as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Items in input order.
    pub fn items(&self) -> &[Slot] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Represent for RecordList {
    fn represent(&self) -> Value {
        Value::Sequence(self.items.iter().map(Slot::represent).collect())
    }
}

/// Builder producing [`Record`]s or [`RecordList`]s for `descriptor`.
///
/// Object records take their state from field assignment alone; constructor
/// arguments are always a subset of the finalized fields, so they carry no
/// extra information.
pub fn record_builder(descriptor: &TypeDescriptor) -> Builder {
    match descriptor.kind {
        TypeKind::Object => object_builder(descriptor.name.clone()),
        TypeKind::Collection => list_builder(descriptor.name.clone()),
    }
}

fn object_builder(type_name: String) -> Builder {
    Arc::new(move |assembly: Assembly| -> Result<Box<dyn Instance>, SchemaError> {
        let mut record = Record::new(type_name.clone());
        for (field, slot) in assembly.fields {
            record.set(field, slot);
        }
        let built: Box<dyn Instance> = Box::new(record);
        Ok(built)
    })
}

fn list_builder(type_name: String) -> Builder {
    Arc::new(move |assembly: Assembly| -> Result<Box<dyn Instance>, SchemaError> {
        let list = RecordList::new(type_name.clone(), assembly.arguments.into_slots());
        let built: Box<dyn Instance> = Box::new(list);
        Ok(built)
    })
}
