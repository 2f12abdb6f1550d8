//! # petstore-rs
//!
//! A petstore service managing pets, orders and the many-to-many association
//! between them, over SQLite.
//!
//! ## Layers
//!
//! - **Entity model** (`core::entity`): pets, orders, order/pet associations
//!   and their default values
//! - **Validation** (`core::validation`, `core::schema`): decoding of
//!   externally-shaped JSON payloads and encoding of responses
//! - **Repositories** (`storage::pets`, `storage::orders`): SQL against an
//!   explicit connection or transaction
//! - **Orchestration** (`handlers`): one transaction per operation, pet
//!   reference checks before any write
//! - **Server** (`server`): axum routes under `/api/v3`, bearer-token stub
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use petstore::prelude::*;
//!
//! let config = AppConfig::from_yaml_file("petstore.yaml")?.apply_env_overrides()?;
//! config.logging.init_tracing()?;
//!
//! let db = Database::connect(&config.database).await?;
//! let addr = config.server.address();
//! ServerBuilder::new()
//!     .with_config(config)
//!     .with_database(db)
//!     .serve(&addr)
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod handlers;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AuthContext, AuthProvider, BearerTokenAuth, NoAuthProvider, NewOrder, NewPet, Order,
        OrderFilter, OrderPet, OrderResponse, OrderStatus, Page, PaginationLimits, Pet,
        PetFilter, PetIdResponse, PetLine, PetResponse, PetStatus, PetstoreError,
        PetstoreResult, ValidationError, encode_order, encode_pet, normalize_order,
        normalize_pet,
    };

    // === Configuration ===
    pub use crate::config::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};

    // === Storage ===
    pub use crate::storage::{Database, Session};

    // === Server ===
    pub use crate::server::{API_PREFIX, AppState, ServerBuilder};

    // === Re-exports from dependencies ===
    pub use async_trait::async_trait;
    pub use axum::Router;
    pub use serde_json::{Value, json};
}
