//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use petstore::prelude::*;

/// Server over a fresh in-memory database, authentication disabled
pub async fn test_server() -> TestServer {
    server_with(AppConfig::test_config()).await
}

/// Server over a fresh in-memory database, bearer token required
pub async fn authenticated_server() -> TestServer {
    let mut config = AppConfig::test_config();
    config.auth.enabled = true;
    server_with(config).await
}

pub async fn server_with(config: AppConfig) -> TestServer {
    let db = Database::connect(&config.database).await.unwrap();
    server_over(config, db)
}

/// Server over a database the test keeps a handle on
pub fn server_over(config: AppConfig, db: Database) -> TestServer {
    let router = ServerBuilder::new()
        .with_config(config)
        .with_database(db)
        .build()
        .unwrap();
    TestServer::new(router)
}

pub fn api(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Create a pet and return its id
pub async fn create_pet(server: &TestServer, name: &str, status: &str) -> i64 {
    let response = server
        .post(&api("/pets"))
        .json(&json!({"name": name, "status": status}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Create an order and return its JSON body
pub async fn create_order(server: &TestServer, body: Value) -> Value {
    let response = server.post(&api("/orders")).json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}
