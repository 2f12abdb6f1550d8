//! HTTP round-trips for `/api/v3/pets`

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_pet() {
    let server = test_server().await;

    let response = server
        .post(&api("/pets"))
        .json(&json!({"name": "doggie", "status": "available"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "doggie");
    assert_eq!(body["status"], "available");
    assert_eq!(body["description"], "");
    assert!(body["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_create_pet_defaults_status() {
    let server = test_server().await;

    let response = server
        .post(&api("/pets"))
        .json(&json!({"name": "rex", "description": "Good boy", "photoUrls": []}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["status"], "available");
    assert_eq!(body["description"], "Good boy");
    assert!(body.get("photoUrls").is_none());
}

#[tokio::test]
async fn test_create_pet_ignores_client_id() {
    let server = test_server().await;
    let first = create_pet(&server, "a", "available").await;

    let response = server
        .post(&api("/pets"))
        .json(&json!({"id": first, "name": "b"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_ne!(response.json::<Value>()["id"], first);
}

#[tokio::test]
async fn test_get_pet() {
    let server = test_server().await;
    let id = create_pet(&server, "whiskers", "pending").await;

    let response = server.get(&api(&format!("/pets/{}", id))).await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "id": id,
        "name": "whiskers",
        "description": "",
        "status": "pending"
    }));
}

#[tokio::test]
async fn test_update_pet_is_partial() {
    let server = test_server().await;
    let response = server
        .post(&api("/pets"))
        .json(&json!({"name": "whiskers", "description": "Furry", "status": "sold"}))
        .await;
    let id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server
        .put(&api(&format!("/pets/{}", id)))
        .json(&json!({"name": "whiskers_changed"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "whiskers_changed");
    assert_eq!(body["description"], "Furry");
    assert_eq!(body["status"], "sold");
}

#[tokio::test]
async fn test_delete_pet() {
    let server = test_server().await;
    let id = create_pet(&server, "rex", "available").await;

    let response = server.delete(&api(&format!("/pets/{}", id))).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&api(&format!("/pets/{}", id))).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["detail"], "Pet not found");

    let response = server.delete(&api(&format!("/pets/{}", id))).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_pets_by_status() {
    let server = test_server().await;
    create_pet(&server, "a", "available").await;
    create_pet(&server, "b", "sold").await;
    create_pet(&server, "c", "available").await;

    let response = server
        .get(&api("/pets"))
        .add_query_param("status", "available")
        .await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    let names: Vec<_> = body.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[tokio::test]
async fn test_find_pets_by_name() {
    let server = test_server().await;
    create_pet(&server, "bark", "available").await;
    create_pet(&server, "rex", "available").await;

    let response = server.get(&api("/pets")).add_query_param("name", "rex").await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["name"], "rex");
}

#[tokio::test]
async fn test_find_pets_pagination() {
    let server = test_server().await;
    for name in ["d", "b", "a", "c"] {
        create_pet(&server, name, "available").await;
    }

    let response = server.get(&api("/pets?limit=1")).await;
    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["name"], "a");

    let response = server.get(&api("/pets?limit=2&offset=2")).await;
    let body: Vec<Value> = response.json();
    let names: Vec<_> = body.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["c", "d"]);
}

#[tokio::test]
async fn test_find_pets_is_idempotent() {
    let server = test_server().await;
    create_pet(&server, "a", "pending").await;
    create_pet(&server, "b", "pending").await;

    let first: Value = server.get(&api("/pets?status=pending")).await.json();
    let second: Value = server.get(&api("/pets?status=pending")).await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_find_pets_default_limit() {
    let server = test_server().await;
    for i in 0..12 {
        create_pet(&server, &format!("pet{:02}", i), "available").await;
    }

    let body: Vec<Value> = server.get(&api("/pets")).await.json();
    assert_eq!(body.len(), 10);
}
