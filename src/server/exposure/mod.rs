//! API exposure modules
//!
//! Each exposure consumes an [`AppState`](crate::server::AppState) and
//! produces a router for its protocol. REST is the only one.

pub mod rest;

pub use rest::RestExposure;
