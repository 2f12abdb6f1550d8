//! Query parameters, filters and pagination

use crate::core::entity::{OrderStatus, PetStatus};
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Bounds applied to the `limit` and `offset` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationLimits {
    /// Page size when `limit` is absent
    pub default_limit: i64,
    /// Largest accepted `limit`
    pub max_limit: i64,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// A validated result window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: PaginationLimits::default().default_limit,
            offset: 0,
        }
    }
}

impl Page {
    /// Resolve optional `limit`/`offset` against the configured bounds
    pub fn resolve(
        limit: Option<i64>,
        offset: Option<i64>,
        bounds: &PaginationLimits,
    ) -> Result<Self, ValidationError> {
        let limit = limit.unwrap_or(bounds.default_limit);
        if limit < 1 {
            return Err(ValidationError::shape(
                "limit",
                format!("{} is less than the minimum of 1", limit),
            ));
        }
        if limit > bounds.max_limit {
            return Err(ValidationError::shape(
                "limit",
                format!("{} is greater than the maximum of {}", limit, bounds.max_limit),
            ));
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(ValidationError::shape(
                "offset",
                format!("{} is less than the minimum of 0", offset),
            ));
        }

        Ok(Self { limit, offset })
    }
}

/// Equality conditions on pets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    pub status: Option<PetStatus>,
    pub name: Option<String>,
}

/// Equality conditions on orders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Only orders holding an association with this pet
    pub pet_id: Option<i64>,
}

/// Query string of `GET /pets`
///
/// # Example
/// ```text
/// GET /pets?status=available&limit=5&offset=10
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PetQueryParams {
    pub status: Option<String>,
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PetQueryParams {
    pub fn filter(&self) -> Result<PetFilter, ValidationError> {
        let status = self
            .status
            .as_deref()
            .map(|s| s.parse::<PetStatus>())
            .transpose()
            .map_err(|e| ValidationError::shape("status", e.to_string()))?;

        Ok(PetFilter {
            status,
            name: self.name.clone(),
        })
    }

    pub fn page(&self, bounds: &PaginationLimits) -> Result<Page, ValidationError> {
        Page::resolve(self.limit, self.offset, bounds)
    }
}

/// Query string of `GET /orders`
///
/// # Example
/// ```text
/// GET /orders?petId=3&includePets=yes
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderQueryParams {
    pub status: Option<String>,
    pub pet_id: Option<i64>,
    pub include_pets: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl OrderQueryParams {
    pub fn filter(&self) -> Result<OrderFilter, ValidationError> {
        let status = self
            .status
            .as_deref()
            .map(|s| s.parse::<OrderStatus>())
            .transpose()
            .map_err(|e| ValidationError::shape("status", e.to_string()))?;

        Ok(OrderFilter {
            status,
            pet_id: self.pet_id,
        })
    }

    pub fn page(&self, bounds: &PaginationLimits) -> Result<Page, ValidationError> {
        Page::resolve(self.limit, self.offset, bounds)
    }

    pub fn include_pets(&self) -> bool {
        is_truthy(self.include_pets.as_deref())
    }
}

/// Query string of `GET /orders/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpandParams {
    pub include_pets: Option<String>,
}

impl ExpandParams {
    pub fn include_pets(&self) -> bool {
        is_truthy(self.include_pets.as_deref())
    }
}

/// Interpret a boolean-like query value ("yes", "true", "1", "on")
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "true" | "1" | "on")
    )
}
