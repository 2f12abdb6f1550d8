//! Entity model for pets, orders and the order/pet association
//!
//! These types are structural only. The sole behavior they carry is the
//! computation of default values (pet status, order status, ship date,
//! association quantity). Validation lives in [`crate::core::validation`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of days added to the creation time when an order has no ship date
pub const DEFAULT_SHIP_DELAY_DAYS: i64 = 7;

/// Quantity of a pet in an order when the payload does not specify one
pub const DEFAULT_QUANTITY: i64 = 1;

/// Error returned when a status string is not a member of its enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus {
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allowed: Vec<String> = self.allowed.iter().map(|s| format!("'{}'", s)).collect();
        write!(f, "'{}' is not one of [{}]", self.value, allowed.join(", "))
    }
}

impl std::error::Error for UnknownStatus {}

/// Sale status of a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub const ALLOWED: &'static [&'static str] = &["available", "pending", "sold"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl FromStr for PetStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PetStatus::Available),
            "pending" => Ok(PetStatus::Pending),
            "sold" => Ok(PetStatus::Sold),
            other => Err(UnknownStatus {
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Placed,
    Approved,
    Delivered,
}

impl OrderStatus {
    pub const ALLOWED: &'static [&'static str] = &["placed", "approved", "delivered"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Approved => "approved",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placed" => Ok(OrderStatus::Placed),
            "approved" => Ok(OrderStatus::Approved),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(UnknownStatus {
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: PetStatus,
}

/// Fields of a pet that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub description: String,
    pub status: PetStatus,
}

impl NewPet {
    /// A pet with the given name and every other field defaulted
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: PetStatus::default(),
        }
    }
}

/// Association row binding one order to one pet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPet {
    pub id: i64,
    pub order_id: i64,
    pub pet_id: i64,
    pub quantity: i64,
}

/// Association requested by a payload, before it has an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetLine {
    pub pet_id: i64,
    pub quantity: i64,
}

impl PetLine {
    pub fn new(pet_id: i64) -> Self {
        Self {
            pet_id,
            quantity: DEFAULT_QUANTITY,
        }
    }

    pub fn with_quantity(pet_id: i64, quantity: i64) -> Self {
        Self { pet_id, quantity }
    }
}

/// An order as stored, with its associations eagerly loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub ship_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub complete: bool,
    /// Associations ordered by pet reference
    pub pet_ids: Vec<OrderPet>,
    /// Full pet records, only loaded on request
    pub pets: Option<Vec<Pet>>,
}

impl Order {
    /// Pet references of the current associations
    pub fn pet_refs(&self) -> impl Iterator<Item = i64> + '_ {
        self.pet_ids.iter().map(|line| line.pet_id)
    }
}

/// Fields of an order that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub ship_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub complete: bool,
}

impl NewOrder {
    /// An order created at `now` with every field defaulted
    pub fn placed_at(now: DateTime<Utc>) -> Self {
        Self {
            ship_date: default_ship_date(now),
            status: OrderStatus::default(),
            complete: false,
        }
    }
}

/// Default ship date for an order created at `created_at`
pub fn default_ship_date(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::days(DEFAULT_SHIP_DELAY_DAYS)
}
