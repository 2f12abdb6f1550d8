//! Order operations
//!
//! Pet references are checked against the pet table inside the same session
//! that writes the associations, before anything is written. The foreign key
//! on `order_pet.pet_id` still rejects a pet deleted concurrently between the
//! check and the write.

use crate::core::error::{PetstoreError, PetstoreResult};
use crate::core::query::{OrderQueryParams, PaginationLimits};
use crate::core::schema::{OrderResponse, encode_order};
use crate::core::validation::normalize_order;
use crate::storage::{Database, orders, pets};
use chrono::Utc;
use serde_json::Value;
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

const ENTITY: &str = "Order";

pub async fn get(db: &Database, id: i64, include_pets: bool) -> PetstoreResult<OrderResponse> {
    debug!(order_id = id, include_pets, "fetching order");
    let mut tx = db.begin().await?;
    let order = orders::fetch_by_id(&mut tx, id, include_pets)
        .await?
        .ok_or(PetstoreError::NotFound { entity: ENTITY })?;
    Ok(encode_order(&order, include_pets))
}

pub async fn add(db: &Database, body: &Value) -> PetstoreResult<OrderResponse> {
    debug!(%body, "adding order");
    let normalized = normalize_order(body, None, false)?;
    if !normalized.extra.is_empty() {
        debug!(fields = ?normalized.extra.keys().collect::<Vec<_>>(), "ignoring unknown order fields");
    }

    let lines = normalized.lines();
    let pet_ids: Vec<i64> = lines.iter().map(|line| line.pet_id).collect();

    let mut tx = db.begin_write().await?;
    ensure_pets_exist(&mut tx, &pet_ids).await?;

    let new_order = normalized.changes.to_new_order(Utc::now());
    let created = orders::create(&mut tx, &new_order, lines).await?;
    tx.commit().await?;
    info!(order_id = created.id, pets = lines.len(), "order created");

    get(db, created.id, false).await
}

pub async fn update(db: &Database, id: i64, body: &Value) -> PetstoreResult<OrderResponse> {
    let mut tx = db.begin_write().await?;
    let mut order = orders::fetch_by_id(&mut tx, id, false)
        .await?
        .ok_or(PetstoreError::NotFound { entity: ENTITY })?;

    let normalized = normalize_order(body, Some(&order), true)?;
    ensure_pets_exist(&mut tx, &normalized.introduced_pet_ids).await?;

    orders::update(
        &mut tx,
        &mut order,
        &normalized.changes,
        normalized.pet_lines.as_deref(),
    )
    .await?;
    tx.commit().await?;
    debug!(order_id = id, replaced_pets = normalized.pet_lines.is_some(), "order updated");

    get(db, id, false).await
}

pub async fn delete(db: &Database, id: i64) -> PetstoreResult<()> {
    let mut tx = db.begin_write().await?;
    if orders::fetch_by_id(&mut tx, id, false).await?.is_none() {
        return Err(PetstoreError::NotFound { entity: ENTITY });
    }
    orders::delete(&mut tx, id).await?;
    tx.commit().await?;
    info!(order_id = id, "order deleted");
    Ok(())
}

pub async fn find(
    db: &Database,
    params: &OrderQueryParams,
    limits: &PaginationLimits,
) -> PetstoreResult<Vec<OrderResponse>> {
    let filter = params.filter()?;
    let page = params.page(limits)?;
    let include_pets = params.include_pets();

    let mut tx = db.begin().await?;
    let found = orders::fetch_all(&mut tx, &filter, include_pets, page).await?;
    Ok(found
        .iter()
        .map(|order| encode_order(order, include_pets))
        .collect())
}

/// Fail with a referential error on the first id that names no pet
async fn ensure_pets_exist(
    ex: &mut SqliteConnection,
    ids: &[i64],
) -> PetstoreResult<()> {
    match pets::first_missing(ex, ids).await? {
        Some(pet_id) => {
            warn!(pet_id, "order references a missing pet");
            Err(PetstoreError::Referential { pet_id })
        }
        None => Ok(()),
    }
}
