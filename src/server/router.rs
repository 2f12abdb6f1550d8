//! Route tables for the petstore API

use super::exposure::rest::{orders, pets};
use super::state::AppState;
use axum::{Router, routing::get};

/// Pet routes
///
/// - GET/POST /pets
/// - GET/PUT/DELETE /pets/{id}
pub fn build_pet_routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(pets::find_pets).post(pets::add_pet))
        .route(
            "/pets/{id}",
            get(pets::get_pet)
                .put(pets::update_pet)
                .delete(pets::delete_pet),
        )
}

/// Order routes
///
/// - GET/POST /orders
/// - GET/PUT/DELETE /orders/{id}
pub fn build_order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::find_orders).post(orders::add_order))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
}
