//! Normalization of pet payloads

use super::{Payload, validators};
use crate::core::entity::{NewPet, Pet, PetStatus};
use crate::core::error::ValidationError;
use serde_json::{Map, Value};

/// Pet fields explicitly present in a payload
///
/// `None` means "absent": the field is neither defaulted nor cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<PetStatus>,
}

impl PetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Apply the present fields onto an existing pet
    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(description) = &self.description {
            pet.description = description.clone();
        }
        if let Some(status) = self.status {
            pet.status = status;
        }
    }

    /// Build a new pet, defaulting every absent optional field
    pub fn to_new_pet(&self) -> Result<NewPet, ValidationError> {
        let name = self
            .name
            .clone()
            .ok_or_else(|| ValidationError::missing("name"))?;
        Ok(NewPet {
            name,
            description: self.description.clone().unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Result of normalizing a pet payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPet {
    pub changes: PetChanges,
    /// Unrecognized keys, kept as received
    pub extra: Map<String, Value>,
}

/// Normalize and validate an externally-shaped pet payload
///
/// With `partial` set only the fields present in `raw` are returned; without
/// it `name` is required. `existing` is the stored pet on update, used to drop
/// fields that would not change anything.
pub fn normalize_pet(
    raw: &Value,
    existing: Option<&Pet>,
    partial: bool,
) -> Result<NormalizedPet, ValidationError> {
    let mut payload = Payload::new(raw)?;
    let mut changes = PetChanges::default();

    match payload.take("name") {
        Some(value) if !value.is_null() => {
            changes.name = Some(validators::non_empty_string("name", &value)?);
        }
        Some(_) => return Err(ValidationError::missing("name")),
        None if !partial => return Err(ValidationError::missing("name")),
        None => {}
    }

    if let Some(value) = payload.take_non_null("description") {
        changes.description = Some(validators::string("description", &value)?);
    }

    if let Some(value) = payload.take_non_null("status") {
        changes.status = Some(validators::status::<PetStatus>("status", &value)?);
    }

    if let Some(pet) = existing {
        if changes.name.as_deref() == Some(pet.name.as_str()) {
            changes.name = None;
        }
        if changes.description.as_deref() == Some(pet.description.as_str()) {
            changes.description = None;
        }
        if changes.status == Some(pet.status) {
            changes.status = None;
        }
    }

    Ok(NormalizedPet {
        changes,
        extra: payload.into_extra(),
    })
}
