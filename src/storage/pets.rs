//! Pet repository

use super::decode_status;
use crate::core::entity::{NewPet, Pet};
use crate::core::query::{Page, PetFilter};
use crate::core::validation::PetChanges;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PetRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
}

impl TryFrom<PetRow> for Pet {
    type Error = sqlx::Error;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        Ok(Pet {
            id: row.id,
            name: row.name,
            description: row.description,
            status: decode_status(&row.status)?,
        })
    }
}

pub async fn create(ex: &mut SqliteConnection, pet: &NewPet) -> Result<Pet, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO pet (name, description, status)
VALUES ($1, $2, $3)
;"#;
    let id = sqlx::query(QUERY)
        .bind(&pet.name)
        .bind(&pet.description)
        .bind(pet.status.as_str())
        .execute(ex)
        .await?
        .last_insert_rowid();

    Ok(Pet {
        id,
        name: pet.name.clone(),
        description: pet.description.clone(),
        status: pet.status,
    })
}

pub async fn fetch_by_id(ex: &mut SqliteConnection, id: i64) -> Result<Option<Pet>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id, name, description, status
FROM pet
WHERE id = $1
;"#;
    sqlx::query_as::<_, PetRow>(QUERY)
        .bind(id)
        .fetch_optional(ex)
        .await?
        .map(Pet::try_from)
        .transpose()
}

/// Pets matching `filter`, ordered by name then id
pub async fn fetch_all(
    ex: &mut SqliteConnection,
    filter: &PetFilter,
    page: Page,
) -> Result<Vec<Pet>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, name, description, status FROM pet WHERE 1 = 1");
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(name) = &filter.name {
        builder.push(" AND name = ").push_bind(name.clone());
    }
    builder
        .push(" ORDER BY name, id LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);

    builder
        .build_query_as::<PetRow>()
        .fetch_all(ex)
        .await?
        .into_iter()
        .map(Pet::try_from)
        .collect()
}

/// Apply `changes` onto `pet` and persist it
pub async fn update(
    ex: &mut SqliteConnection,
    pet: &mut Pet,
    changes: &PetChanges,
) -> Result<(), sqlx::Error> {
    if changes.is_empty() {
        return Ok(());
    }
    changes.apply_to(pet);

    const QUERY: &str = r#"
UPDATE pet
SET name = $2, description = $3, status = $4
WHERE id = $1
;"#;
    sqlx::query(QUERY)
        .bind(pet.id)
        .bind(&pet.name)
        .bind(&pet.description)
        .bind(pet.status.as_str())
        .execute(ex)
        .await?;
    Ok(())
}

/// Look the pet up and apply `changes`; `None` when it does not exist
pub async fn update_by_id(
    ex: &mut SqliteConnection,
    id: i64,
    changes: &PetChanges,
) -> Result<Option<Pet>, sqlx::Error> {
    let Some(mut pet) = fetch_by_id(&mut *ex, id).await? else {
        return Ok(None);
    };
    update(ex, &mut pet, changes).await?;
    Ok(Some(pet))
}

/// Delete a pet; its order associations go with it
///
/// Returns whether a row was deleted.
pub async fn delete(ex: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    const QUERY: &str = "DELETE FROM pet WHERE id = $1;";
    let result = sqlx::query(QUERY).bind(id).execute(ex).await?;
    Ok(result.rows_affected() > 0)
}

/// First id in `ids` that does not resolve to a pet
pub async fn first_missing(
    ex: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Option<i64>, sqlx::Error> {
    const QUERY: &str = "SELECT EXISTS (SELECT 1 FROM pet WHERE id = $1);";
    for &id in ids {
        let exists: bool = sqlx::query_scalar(QUERY).bind(id).fetch_one(&mut *ex).await?;
        if !exists {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PetStatus;
    use crate::storage::Database;

    async fn seed(ex: &mut SqliteConnection) -> Vec<Pet> {
        let mut pets = Vec::new();
        for (name, status) in [
            ("rex", PetStatus::Sold),
            ("bark", PetStatus::Available),
            ("whiskers", PetStatus::Available),
            ("bark", PetStatus::Pending),
        ] {
            let new = NewPet {
                status,
                ..NewPet::named(name)
            };
            pets.push(create(&mut *ex, &new).await.unwrap());
        }
        pets
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        let created = create(&mut conn, &NewPet::named("doggie")).await.unwrap();
        let fetched = fetch_by_id(&mut conn, created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(fetch_by_id(&mut conn, 999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_all_ordering_and_filters() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let pets = seed(&mut conn).await;

        let all = fetch_all(&mut conn, &PetFilter::default(), Page::default())
            .await
            .unwrap();
        let names: Vec<_> = all.iter().map(|p| (p.name.as_str(), p.id)).collect();
        assert_eq!(
            names,
            vec![
                ("bark", pets[1].id),
                ("bark", pets[3].id),
                ("rex", pets[0].id),
                ("whiskers", pets[2].id),
            ]
        );

        let available = PetFilter {
            status: Some(PetStatus::Available),
            ..Default::default()
        };
        let found = fetch_all(&mut conn, &available, Page::default()).await.unwrap();
        assert_eq!(found.len(), 2);

        let named = PetFilter {
            name: Some("bark".to_string()),
            status: Some(PetStatus::Pending),
        };
        let found = fetch_all(&mut conn, &named, Page::default()).await.unwrap();
        assert_eq!(found, vec![pets[3].clone()]);
    }

    #[tokio::test]
    async fn test_fetch_all_pagination() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        seed(&mut conn).await;

        let page = Page { limit: 1, offset: 2 };
        let found = fetch_all(&mut conn, &PetFilter::default(), page).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "rex");
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let pet = create(
            &mut conn,
            &NewPet {
                name: "bark".to_string(),
                description: "Noisey".to_string(),
                status: PetStatus::Sold,
            },
        )
        .await
        .unwrap();

        let changes = PetChanges {
            status: Some(PetStatus::Available),
            ..Default::default()
        };
        let updated = update_by_id(&mut conn, pet.id, &changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "Noisey");
        assert_eq!(updated.status, PetStatus::Available);

        let stored = fetch_by_id(&mut conn, pet.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert!(update_by_id(&mut conn, 999, &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let pet = create(&mut conn, &NewPet::named("doggie")).await.unwrap();

        assert!(delete(&mut conn, pet.id).await.unwrap());
        assert!(!delete(&mut conn, pet.id).await.unwrap());
        assert_eq!(fetch_by_id(&mut conn, pet.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_first_missing() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let pets = seed(&mut conn).await;

        let ids: Vec<i64> = pets.iter().map(|p| p.id).collect();
        assert_eq!(first_missing(&mut conn, &ids).await.unwrap(), None);
        assert_eq!(
            first_missing(&mut conn, &[pets[0].id, 500, 600]).await.unwrap(),
            Some(500)
        );
        assert_eq!(first_missing(&mut conn, &[]).await.unwrap(), None);
    }
}
