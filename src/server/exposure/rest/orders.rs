//! HTTP handlers for `/orders`

use super::{json_body, path_id, query_params};
use crate::core::error::PetstoreResult;
use crate::core::query::{ExpandParams, OrderQueryParams};
use crate::core::schema::OrderResponse;
use crate::handlers::orders;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

pub async fn add_order(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> PetstoreResult<(StatusCode, Json<OrderResponse>)> {
    let body = json_body(body)?;
    let order = orders::add(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn find_orders(
    State(state): State<AppState>,
    params: Result<Query<OrderQueryParams>, QueryRejection>,
) -> PetstoreResult<Json<Vec<OrderResponse>>> {
    let params = query_params(params)?;
    let found = orders::find(&state.db, &params, state.pagination()).await?;
    Ok(Json(found))
}

pub async fn get_order(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    expand: Result<Query<ExpandParams>, QueryRejection>,
) -> PetstoreResult<Json<OrderResponse>> {
    let id = path_id(id)?;
    let expand = query_params(expand)?;
    Ok(Json(orders::get(&state.db, id, expand.include_pets()).await?))
}

pub async fn update_order(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> PetstoreResult<Json<OrderResponse>> {
    let id = path_id(id)?;
    let body = json_body(body)?;
    Ok(Json(orders::update(&state.db, id, &body).await?))
}

pub async fn delete_order(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> PetstoreResult<StatusCode> {
    let id = path_id(id)?;
    orders::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
