//! External response shapes
//!
//! `encode_*` functions turn stored entities into the public JSON shape:
//! `ship_date` becomes a `shipDate` date string and association rows become
//! `petIds: [{petId, quantity}]`.

use crate::core::entity::{Order, OrderPet, OrderStatus, Pet, PetStatus};
use crate::core::validation::validators::format_date;
use serde::{Deserialize, Serialize};

/// Public shape of a pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: PetStatus,
}

/// Public shape of an order/pet association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetIdResponse {
    pub pet_id: i64,
    pub quantity: i64,
}

/// Public shape of an order
///
/// `pets` is only serialized when the caller asked for expanded pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub ship_date: String,
    pub status: OrderStatus,
    pub complete: bool,
    pub pet_ids: Vec<PetIdResponse>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pets: Option<Vec<PetResponse>>,
}

pub fn encode_pet(pet: &Pet) -> PetResponse {
    PetResponse {
        id: pet.id,
        name: pet.name.clone(),
        description: pet.description.clone(),
        status: pet.status,
    }
}

fn encode_pet_id(line: &OrderPet) -> PetIdResponse {
    PetIdResponse {
        pet_id: line.pet_id,
        quantity: line.quantity,
    }
}

/// Encode an order, with its full pet records when `include_expanded_pets`
///
/// Expansion of an order whose pets were not loaded yields an empty list.
pub fn encode_order(order: &Order, include_expanded_pets: bool) -> OrderResponse {
    let pets = include_expanded_pets.then(|| {
        order
            .pets
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(encode_pet)
            .collect()
    });

    OrderResponse {
        id: order.id,
        ship_date: format_date(&order.ship_date),
        status: order.status,
        complete: order.complete,
        pet_ids: order.pet_ids.iter().map(encode_pet_id).collect(),
        pets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn order() -> Order {
        Order {
            id: 5,
            ship_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            status: OrderStatus::Placed,
            complete: false,
            pet_ids: vec![OrderPet {
                id: 9,
                order_id: 5,
                pet_id: 2,
                quantity: 4,
            }],
            pets: Some(vec![Pet {
                id: 2,
                name: "doggie".to_string(),
                description: String::new(),
                status: PetStatus::Available,
            }]),
        }
    }

    #[test]
    fn test_encode_order_external_names() {
        let body = serde_json::to_value(encode_order(&order(), false)).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 5,
                "shipDate": "2024-06-01",
                "status": "placed",
                "complete": false,
                "petIds": [{"petId": 2, "quantity": 4}]
            })
        );
    }

    #[test]
    fn test_encode_order_with_expanded_pets() {
        let body = serde_json::to_value(encode_order(&order(), true)).unwrap();
        assert_eq!(body["pets"][0]["name"], "doggie");
        assert_eq!(body["pets"][0]["status"], "available");
    }

    #[test]
    fn test_encode_pet() {
        let pet = Pet {
            id: 1,
            name: "whiskers".to_string(),
            description: "Furry".to_string(),
            status: PetStatus::Sold,
        };
        let body = serde_json::to_value(encode_pet(&pet)).unwrap();
        assert_eq!(
            body,
            json!({"id": 1, "name": "whiskers", "description": "Furry", "status": "sold"})
        );
    }
}
