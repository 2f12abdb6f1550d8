//! REST exposure of the petstore API
//!
//! Every API route lives under [`API_PREFIX`] behind the authentication
//! middleware. Health checks stay outside it.

pub mod orders;
pub mod pets;

use crate::core::error::{PetstoreResult, ValidationError};
use crate::server::middleware::require_auth;
use crate::server::router::{build_order_routes, build_pet_routes};
use crate::server::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Mount point of the API routes
pub const API_PREFIX: &str = "/api/v3";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router over `state`
    ///
    /// Returns a router with:
    /// - health check routes
    /// - pet and order routes under [`API_PREFIX`], authenticated
    /// - request tracing on every route
    pub fn build_router(state: AppState) -> Router {
        let api = build_pet_routes()
            .merge(build_order_routes())
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

        Router::new()
            .nest(API_PREFIX, api)
            .merge(Self::health_routes())
            .with_state(state)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router<AppState> {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME")
        }))
    }
}

pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> PetstoreResult<Value> {
    let Json(value) = body.map_err(|rejection| ValidationError::shape("body", rejection.body_text()))?;
    Ok(value)
}

pub(crate) fn path_id(id: Result<Path<i64>, PathRejection>) -> PetstoreResult<i64> {
    let Path(id) = id.map_err(|rejection| ValidationError::shape("id", rejection.body_text()))?;
    Ok(id)
}

pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> PetstoreResult<T> {
    let Query(params) =
        params.map_err(|rejection| ValidationError::shape("query", rejection.body_text()))?;
    Ok(params)
}
