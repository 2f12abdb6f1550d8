//! Validation and normalization of externally-shaped payloads
//!
//! Request bodies arrive as loosely typed JSON objects using the public field
//! names (`shipDate`, `petIds[].petId`, ...). The functions in this module
//! turn them into internally-shaped change sets before anything touches the
//! store. They are pure and never perform I/O.

pub mod order;
pub mod pet;
pub mod validators;

pub use order::{NormalizedOrder, OrderChanges, normalize_order};
pub use pet::{NormalizedPet, PetChanges, normalize_pet};

use crate::core::error::ValidationError;
use serde_json::{Map, Value};

/// Keys that are assigned by the store and never read from a payload
const READ_ONLY_FIELDS: &[&str] = &["id"];

/// A payload object being consumed field by field
///
/// Known fields are taken out one at a time; whatever remains is returned as
/// the `extra` map.
pub(crate) struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    pub(crate) fn new(raw: &Value) -> Result<Self, ValidationError> {
        let mut fields = raw
            .as_object()
            .cloned()
            .ok_or_else(|| ValidationError::shape("body", format!("{} is not of type 'object'", raw)))?;
        for key in READ_ONLY_FIELDS {
            fields.remove(*key);
        }
        Ok(Self { fields })
    }

    /// Take a field, null included
    pub(crate) fn take(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Take a field, treating an explicit null as absent
    pub(crate) fn take_non_null(&mut self, key: &str) -> Option<Value> {
        self.take(key).filter(|value| !value.is_null())
    }

    pub(crate) fn into_extra(self) -> Map<String, Value> {
        self.fields
    }
}
