//! HTTP handlers for `/pets`

use super::{json_body, path_id, query_params};
use crate::core::error::PetstoreResult;
use crate::core::query::PetQueryParams;
use crate::core::schema::PetResponse;
use crate::handlers::pets;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

pub async fn add_pet(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> PetstoreResult<(StatusCode, Json<PetResponse>)> {
    let body = json_body(body)?;
    let pet = pets::add(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

pub async fn find_pets(
    State(state): State<AppState>,
    params: Result<Query<PetQueryParams>, QueryRejection>,
) -> PetstoreResult<Json<Vec<PetResponse>>> {
    let params = query_params(params)?;
    let found = pets::find(&state.db, &params, state.pagination()).await?;
    Ok(Json(found))
}

pub async fn get_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> PetstoreResult<Json<PetResponse>> {
    let id = path_id(id)?;
    Ok(Json(pets::get(&state.db, id).await?))
}

pub async fn update_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> PetstoreResult<Json<PetResponse>> {
    let id = path_id(id)?;
    let body = json_body(body)?;
    Ok(Json(pets::update(&state.db, id, &body).await?))
}

pub async fn delete_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> PetstoreResult<StatusCode> {
    let id = path_id(id)?;
    pets::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
