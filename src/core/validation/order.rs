//! Normalization of order payloads

use super::{Payload, validators};
use crate::core::entity::{NewOrder, Order, OrderStatus, PetLine};
use crate::core::error::ValidationError;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Order fields explicitly present in a payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub ship_date: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
    pub complete: Option<bool>,
}

impl OrderChanges {
    pub fn is_empty(&self) -> bool {
        self.ship_date.is_none() && self.status.is_none() && self.complete.is_none()
    }

    /// Apply the present fields onto an existing order
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(ship_date) = self.ship_date {
            order.ship_date = ship_date;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(complete) = self.complete {
            order.complete = complete;
        }
    }

    /// Build a new order created at `now`, defaulting every absent field
    pub fn to_new_order(&self, now: DateTime<Utc>) -> NewOrder {
        let mut order = NewOrder::placed_at(now);
        if let Some(ship_date) = self.ship_date {
            order.ship_date = ship_date;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(complete) = self.complete {
            order.complete = complete;
        }
        order
    }
}

/// Result of normalizing an order payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedOrder {
    pub changes: OrderChanges,
    /// Replacement association list; `None` when `petIds` was absent
    pub pet_lines: Option<Vec<PetLine>>,
    /// Pet references in `pet_lines` that the existing order does not hold yet
    pub introduced_pet_ids: Vec<i64>,
    /// Unrecognized keys, kept as received
    pub extra: Map<String, Value>,
}

impl NormalizedOrder {
    /// Association list to create, empty when none was supplied
    pub fn lines(&self) -> &[PetLine] {
        self.pet_lines.as_deref().unwrap_or_default()
    }
}

/// Normalize and validate an externally-shaped order payload
///
/// `shipDate` becomes a midnight-UTC timestamp and `petIds` becomes a list of
/// [`PetLine`]s. No order field is required, so `partial` only controls
/// whether `existing` is consulted.
pub fn normalize_order(
    raw: &Value,
    existing: Option<&Order>,
    partial: bool,
) -> Result<NormalizedOrder, ValidationError> {
    let mut payload = Payload::new(raw)?;
    let mut changes = OrderChanges::default();

    if let Some(value) = payload.take_non_null("shipDate") {
        changes.ship_date = Some(validators::date(&value)?);
    }

    if let Some(value) = payload.take_non_null("status") {
        changes.status = Some(validators::status::<OrderStatus>("status", &value)?);
    }

    if let Some(value) = payload.take_non_null("complete") {
        changes.complete = Some(validators::boolean("complete", &value)?);
    }

    let pet_lines = match payload.take("petIds") {
        Some(Value::Null) if partial => None,
        Some(Value::Null) => Some(Vec::new()),
        Some(value) => Some(decode_pet_lines(&value)?),
        None => None,
    };

    let held: HashSet<i64> = match existing.filter(|_| partial) {
        Some(order) => order.pet_refs().collect(),
        None => HashSet::new(),
    };
    let introduced_pet_ids = pet_lines
        .iter()
        .flatten()
        .map(|line| line.pet_id)
        .filter(|id| !held.contains(id))
        .collect();

    Ok(NormalizedOrder {
        changes,
        pet_lines,
        introduced_pet_ids,
        extra: payload.into_extra(),
    })
}

/// Decode `petIds: [{petId, quantity}]`
fn decode_pet_lines(value: &Value) -> Result<Vec<PetLine>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::shape("petIds", format!("{} is not of type 'array'", value)))?;

    let mut seen = HashSet::with_capacity(items.len());
    let mut lines = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let field = format!("petIds[{}]", index);
        let entry = item
            .as_object()
            .ok_or_else(|| ValidationError::shape(&field, format!("{} is not of type 'object'", item)))?;

        let pet_id = match entry.get("petId") {
            Some(v) if !v.is_null() => validators::integer(&format!("{}.petId", field), v)?,
            _ => return Err(ValidationError::missing(format!("{}.petId", field))),
        };
        let line = match entry.get("quantity") {
            Some(v) if !v.is_null() => PetLine::with_quantity(
                pet_id,
                validators::positive_integer(&format!("{}.quantity", field), v)?,
            ),
            _ => PetLine::new(pet_id),
        };

        if !seen.insert(pet_id) {
            return Err(ValidationError::shape(
                format!("{}.petId", field),
                format!("Pet {} is listed more than once", pet_id),
            ));
        }
        lines.push(line);
    }
    Ok(lines)
}
