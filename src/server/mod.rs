//! HTTP server for the petstore API
//!
//! This module provides a `ServerBuilder` that wires:
//! - the database and configuration into the shared [`AppState`]
//! - the authentication middleware on every API route
//! - the REST routes for pets and orders, plus health checks

pub mod builder;
pub mod exposure;
pub mod middleware;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use exposure::rest::API_PREFIX;
pub use state::AppState;
