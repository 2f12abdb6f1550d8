//! Pet operations
//!
//! Each operation runs in its own session. Early returns drop the session,
//! which rolls back anything staged so far.

use crate::core::error::{PetstoreError, PetstoreResult};
use crate::core::query::{PaginationLimits, PetQueryParams};
use crate::core::schema::{PetResponse, encode_pet};
use crate::core::validation::normalize_pet;
use crate::storage::{Database, pets};
use serde_json::Value;
use tracing::{debug, info};

const ENTITY: &str = "Pet";

pub async fn get(db: &Database, id: i64) -> PetstoreResult<PetResponse> {
    debug!(pet_id = id, "fetching pet");
    let mut tx = db.begin().await?;
    let pet = pets::fetch_by_id(&mut tx, id)
        .await?
        .ok_or(PetstoreError::NotFound { entity: ENTITY })?;
    Ok(encode_pet(&pet))
}

pub async fn add(db: &Database, body: &Value) -> PetstoreResult<PetResponse> {
    debug!(%body, "adding pet");
    let normalized = normalize_pet(body, None, false)?;
    if !normalized.extra.is_empty() {
        debug!(fields = ?normalized.extra.keys().collect::<Vec<_>>(), "ignoring unknown pet fields");
    }
    let new_pet = normalized.changes.to_new_pet()?;

    let mut tx = db.begin_write().await?;
    let created = pets::create(&mut tx, &new_pet).await?;
    tx.commit().await?;
    info!(pet_id = created.id, "pet created");

    get(db, created.id).await
}

pub async fn update(db: &Database, id: i64, body: &Value) -> PetstoreResult<PetResponse> {
    let mut tx = db.begin_write().await?;
    let mut pet = pets::fetch_by_id(&mut tx, id)
        .await?
        .ok_or(PetstoreError::NotFound { entity: ENTITY })?;

    let normalized = normalize_pet(body, Some(&pet), true)?;
    pets::update(&mut tx, &mut pet, &normalized.changes).await?;
    tx.commit().await?;
    debug!(pet_id = id, "pet updated");

    get(db, id).await
}

/// Delete a pet; orders holding it lose the association
pub async fn delete(db: &Database, id: i64) -> PetstoreResult<()> {
    let mut tx = db.begin_write().await?;
    if pets::fetch_by_id(&mut tx, id).await?.is_none() {
        return Err(PetstoreError::NotFound { entity: ENTITY });
    }
    pets::delete(&mut tx, id).await?;
    tx.commit().await?;
    info!(pet_id = id, "pet deleted");
    Ok(())
}

pub async fn find(
    db: &Database,
    params: &PetQueryParams,
    limits: &PaginationLimits,
) -> PetstoreResult<Vec<PetResponse>> {
    let filter = params.filter()?;
    let page = params.page(limits)?;

    let mut tx = db.begin().await?;
    let found = pets::fetch_all(&mut tx, &filter, page).await?;
    Ok(found.iter().map(encode_pet).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PetStatus;
    use crate::core::error::ValidationError;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_defaults_status() {
        let db = Database::in_memory().await.unwrap();
        let pet = add(&db, &json!({"name": "doggie"})).await.unwrap();
        assert_eq!(pet.name, "doggie");
        assert_eq!(pet.description, "");
        assert_eq!(pet.status, PetStatus::Available);
        assert_eq!(get(&db, pet.id).await.unwrap(), pet);
    }

    #[tokio::test]
    async fn test_add_without_name_writes_nothing() {
        let db = Database::in_memory().await.unwrap();
        let err = add(&db, &json!({"status": "sold"})).await.unwrap_err();
        assert!(matches!(
            err,
            PetstoreError::Validation(ValidationError::MissingField { .. })
        ));

        let found = find(&db, &PetQueryParams::default(), &PaginationLimits::default())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_pet() {
        let db = Database::in_memory().await.unwrap();
        let err = get(&db, 42).await.unwrap_err();
        assert_eq!(err.to_string(), "Pet not found");
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = Database::in_memory().await.unwrap();
        let pet = add(
            &db,
            &json!({"name": "whiskers", "description": "Furry", "status": "available"}),
        )
        .await
        .unwrap();

        let updated = update(&db, pet.id, &json!({"name": "whiskers_changed"}))
            .await
            .unwrap();
        assert_eq!(updated.name, "whiskers_changed");
        assert_eq!(updated.description, "Furry");
        assert_eq!(updated.status, PetStatus::Available);

        let err = update(&db, 999, &json!({"name": "x"})).await.unwrap_err();
        assert!(matches!(err, PetstoreError::NotFound { entity: "Pet" }));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_status() {
        let db = Database::in_memory().await.unwrap();
        let pet = add(&db, &json!({"name": "rex"})).await.unwrap();
        let err = update(&db, pet.id, &json!({"status": "pendingxx"}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(get(&db, pet.id).await.unwrap().status, PetStatus::Available);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let pet = add(&db, &json!({"name": "rex"})).await.unwrap();
        delete(&db, pet.id).await.unwrap();
        assert!(matches!(
            delete(&db, pet.id).await.unwrap_err(),
            PetstoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_find_is_idempotent_and_paginated() {
        let db = Database::in_memory().await.unwrap();
        for name in ["c", "a", "b"] {
            add(&db, &json!({"name": name, "status": "pending"})).await.unwrap();
        }
        let limits = PaginationLimits::default();
        let params = PetQueryParams {
            status: Some("pending".to_string()),
            ..Default::default()
        };

        let first = find(&db, &params, &limits).await.unwrap();
        let second = find(&db, &params, &limits).await.unwrap();
        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let paged = PetQueryParams {
            limit: Some(1),
            offset: Some(1),
            ..params
        };
        let found = find(&db, &paged, &limits).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "b");
    }

    #[tokio::test]
    async fn test_find_rejects_large_limit() {
        let db = Database::in_memory().await.unwrap();
        let params = PetQueryParams {
            limit: Some(500),
            ..Default::default()
        };
        let err = find(&db, &params, &PaginationLimits::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500 is greater than the maximum of 100"));
    }
}
