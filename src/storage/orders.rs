//! Order repository
//!
//! Orders are always returned with their association rows, ordered by pet
//! reference. Full pet records are loaded only when asked for.

use super::decode_status;
use super::pets::PetRow;
use crate::core::entity::{NewOrder, Order, OrderPet, Pet, PetLine};
use crate::core::query::{OrderFilter, Page};
use crate::core::validation::OrderChanges;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    ship_date: DateTime<Utc>,
    status: String,
    complete: bool,
}

impl TryFrom<OrderRow> for Order {
    type Error = sqlx::Error;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            ship_date: row.ship_date,
            status: decode_status(&row.status)?,
            complete: row.complete,
            pet_ids: Vec::new(),
            pets: None,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderPetRow {
    id: i64,
    order_id: i64,
    pet_id: i64,
    quantity: i64,
}

impl From<OrderPetRow> for OrderPet {
    fn from(row: OrderPetRow) -> Self {
        OrderPet {
            id: row.id,
            order_id: row.order_id,
            pet_id: row.pet_id,
            quantity: row.quantity,
        }
    }
}

/// Insert an order together with its associations
pub async fn create(
    ex: &mut SqliteConnection,
    order: &NewOrder,
    lines: &[PetLine],
) -> Result<Order, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO "order" (ship_date, status, complete)
VALUES ($1, $2, $3)
;"#;
    let id = sqlx::query(QUERY)
        .bind(order.ship_date)
        .bind(order.status.as_str())
        .bind(order.complete)
        .execute(&mut *ex)
        .await?
        .last_insert_rowid();

    insert_lines(&mut *ex, id, lines).await?;

    fetch_by_id(ex, id, false)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_by_id(
    ex: &mut SqliteConnection,
    id: i64,
    include_pets: bool,
) -> Result<Option<Order>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id, ship_date, status, complete
FROM "order"
WHERE id = $1
;"#;
    let Some(row) = sqlx::query_as::<_, OrderRow>(QUERY)
        .bind(id)
        .fetch_optional(&mut *ex)
        .await?
    else {
        return Ok(None);
    };

    let mut order = Order::try_from(row)?;
    load_associations(ex, &mut order, include_pets).await?;
    Ok(Some(order))
}

/// Orders matching `filter`, ordered by id
pub async fn fetch_all(
    ex: &mut SqliteConnection,
    filter: &OrderFilter,
    include_pets: bool,
    page: Page,
) -> Result<Vec<Order>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT o.id, o.ship_date, o.status, o.complete FROM \"order\" o WHERE 1 = 1");
    if let Some(status) = filter.status {
        builder.push(" AND o.status = ").push_bind(status.as_str());
    }
    if let Some(pet_id) = filter.pet_id {
        builder
            .push(" AND EXISTS (SELECT 1 FROM order_pet op WHERE op.order_id = o.id AND op.pet_id = ")
            .push_bind(pet_id)
            .push(")");
    }
    builder
        .push(" ORDER BY o.id LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);

    let rows = builder
        .build_query_as::<OrderRow>()
        .fetch_all(&mut *ex)
        .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let mut order = Order::try_from(row)?;
        load_associations(&mut *ex, &mut order, include_pets).await?;
        orders.push(order);
    }
    Ok(orders)
}

/// Apply `changes` onto `order` and persist it
///
/// When `lines` is given the association collection is cleared and replaced
/// wholesale by it.
pub async fn update(
    ex: &mut SqliteConnection,
    order: &mut Order,
    changes: &OrderChanges,
    lines: Option<&[PetLine]>,
) -> Result<(), sqlx::Error> {
    if !changes.is_empty() {
        changes.apply_to(order);

        const QUERY: &str = r#"
UPDATE "order"
SET ship_date = $2, status = $3, complete = $4
WHERE id = $1
;"#;
        sqlx::query(QUERY)
            .bind(order.id)
            .bind(order.ship_date)
            .bind(order.status.as_str())
            .bind(order.complete)
            .execute(&mut *ex)
            .await?;
    }

    if let Some(lines) = lines {
        sqlx::query("DELETE FROM order_pet WHERE order_id = $1;")
            .bind(order.id)
            .execute(&mut *ex)
            .await?;
        insert_lines(&mut *ex, order.id, lines).await?;
        let include_pets = order.pets.is_some();
        load_associations(ex, order, include_pets).await?;
    }
    Ok(())
}

/// Look the order up and apply `changes`; `None` when it does not exist
pub async fn update_by_id(
    ex: &mut SqliteConnection,
    id: i64,
    changes: &OrderChanges,
    lines: Option<&[PetLine]>,
) -> Result<Option<Order>, sqlx::Error> {
    let Some(mut order) = fetch_by_id(&mut *ex, id, false).await? else {
        return Ok(None);
    };
    update(ex, &mut order, changes, lines).await?;
    Ok(Some(order))
}

/// Delete an order and its associations
///
/// Returns whether a row was deleted.
pub async fn delete(ex: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM \"order\" WHERE id = $1;")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn insert_lines(
    ex: &mut SqliteConnection,
    order_id: i64,
    lines: &[PetLine],
) -> Result<(), sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO order_pet (order_id, pet_id, quantity)
VALUES ($1, $2, $3)
;"#;
    for line in lines {
        sqlx::query(QUERY)
            .bind(order_id)
            .bind(line.pet_id)
            .bind(line.quantity)
            .execute(&mut *ex)
            .await?;
    }
    Ok(())
}

async fn load_associations(
    ex: &mut SqliteConnection,
    order: &mut Order,
    include_pets: bool,
) -> Result<(), sqlx::Error> {
    const LINES: &str = r#"
SELECT id, order_id, pet_id, quantity
FROM order_pet
WHERE order_id = $1
ORDER BY pet_id
;"#;
    order.pet_ids = sqlx::query_as::<_, OrderPetRow>(LINES)
        .bind(order.id)
        .fetch_all(&mut *ex)
        .await?
        .into_iter()
        .map(OrderPet::from)
        .collect();

    order.pets = if include_pets {
        const PETS: &str = r#"
SELECT p.id, p.name, p.description, p.status
FROM pet p
JOIN order_pet op ON op.pet_id = p.id
WHERE op.order_id = $1
ORDER BY p.id
;"#;
        let pets = sqlx::query_as::<_, PetRow>(PETS)
            .bind(order.id)
            .fetch_all(ex)
            .await?
            .into_iter()
            .map(Pet::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Some(pets)
    } else {
        None
    };
    Ok(())
}
