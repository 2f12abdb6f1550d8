//! Core module containing the entity model, validation and error types

pub mod auth;
pub mod entity;
pub mod error;
pub mod query;
pub mod schema;
pub mod validation;

pub use auth::{AuthContext, AuthProvider, BearerTokenAuth, NoAuthProvider};
pub use entity::{NewOrder, NewPet, Order, OrderPet, OrderStatus, Pet, PetLine, PetStatus};
pub use error::{PetstoreError, PetstoreResult, ValidationError};
pub use query::{OrderFilter, Page, PaginationLimits, PetFilter};
pub use schema::{OrderResponse, PetIdResponse, PetResponse, encode_order, encode_pet};
pub use validation::{normalize_order, normalize_pet};
