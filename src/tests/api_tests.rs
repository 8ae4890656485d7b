use crate::api::models::USER_NOT_FOUND_MESSAGE;
use crate::infrastructure::storage::Storage;
use crate::tests::{create_test_app, lucas};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn assert_not_found(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, &json!({ "message": USER_NOT_FOUND_MESSAGE }));
}

#[tokio::test]
async fn test_list_users() {
    let (app, service) = create_test_app();
    let (status, body) = send_json(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["full_name"], "Lucas de Paula");
    assert_eq!(users[0]["email"], "lucas@email.com");
    assert_eq!(users[0]["password"], "senha123");
    assert!(users[0]["id"].is_i64());
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (app, service) = create_test_app();
    let user = service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(&app, Method::GET, &format!("/api/users/{}", user.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "lucas@email.com");
    assert_eq!(body["id"], user.id);
}

#[tokio::test]
async fn test_get_unknown_user() {
    let (app, _) = create_test_app();
    let (status, body) = send_json(&app, Method::GET, "/api/users/999", None).await;
    assert_not_found(status, &body);

    let (status, body) = send_json(&app, Method::GET, "/api/users/abc", None).await;
    assert_not_found(status, &body);
}

#[tokio::test]
async fn test_update_user() {
    let (app, service) = create_test_app();
    let user = service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/users/{}", user.id),
        Some(json!({ "full_name": "Lucas de Paula atualizado!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Lucas de Paula atualizado!");
    assert_eq!(body["email"], "lucas@email.com");
    assert_eq!(body["password"], "senha123");
}

#[tokio::test]
async fn test_update_unknown_user() {
    let (app, service) = create_test_app();
    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/users/999",
        Some(json!({ "full_name": "Usuário não existe" })),
    )
    .await;
    assert_not_found(status, &body);
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_unknown_user_with_bad_body() {
    let (app, _) = create_test_app();
    let (status, body) = send_json(&app, Method::PUT, "/api/users/999", Some(json!({ "full_name": "" }))).await;
    assert_not_found(status, &body);

    let (status, body) = send_json(&app, Method::PUT, "/api/users/999", Some(json!({ "full_name": 42 }))).await;
    assert_not_found(status, &body);
}

#[tokio::test]
async fn test_update_with_malformed_body() {
    let (app, service) = create_test_app();
    let user = service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/users/{}", user.id),
        Some(json!({ "full_name": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert_eq!(service.get_user(&user.id.to_string()).await.unwrap().full_name, "Lucas de Paula");
}

#[tokio::test]
async fn test_delete_user() {
    let (app, service) = create_test_app();
    let user = service.storage().create_user(lucas()).await.unwrap();
    let uri = format!("/api/users/{}", user.id);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send_json(&app, Method::GET, &uri, None).await;
    assert_not_found(status, &body);
}

#[tokio::test]
async fn test_delete_unknown_user() {
    let (app, _) = create_test_app();
    let (status, body) = send_json(&app, Method::DELETE, "/api/users/999", None).await;
    assert_not_found(status, &body);
}

#[tokio::test]
async fn test_create_user() {
    let (app, _) = create_test_app();
    let payload = json!({
        "full_name": "Lucas de Paula",
        "email": "lucas@email.com",
        "password": "senha123"
    });
    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "lucas@email.com");

    let (status, body) = send_json(&app, Method::POST, "/api/users", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 2);
    assert_eq!(body["email"], "lucas@email.com");
}

// One reset up front, then every case creates the same user again.
#[tokio::test]
async fn test_suite_sharing_one_store_without_reset() {
    let (app, service) = create_test_app();
    service.storage().reset().await.unwrap();

    service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let user = service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(&app, Method::GET, &format!("/api/users/{}", user.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "lucas@email.com");

    let user = service.storage().create_user(lucas()).await.unwrap();
    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/users/{}", user.id),
        Some(json!({ "full_name": "Lucas de Paula atualizado!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Lucas de Paula atualizado!");

    let user = service.storage().create_user(lucas()).await.unwrap();
    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{}", user.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(service.list_users().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let (app, service) = create_test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "full_name": "Lucas de Paula", "email": "lucas@email.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_user_lifecycle() {
    let (app, service) = create_test_app();
    service.storage().reset().await.unwrap();

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({
            "full_name": "Lucas de Paula",
            "email": "lucas@email.com",
            "password": "senha123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/users/{}", created["id"]);

    let (_, list) = send_json(&app, Method::GET, "/api/users", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, fetched) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "lucas@email.com");

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "full_name": "Lucas de Paula atualizado!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["full_name"], "Lucas de Paula atualizado!");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, Method::GET, &uri, None).await;
    assert_not_found(status, &body);

    let (status, logs) = send_json(&app, Method::GET, "/api/logs", None).await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["action"].as_str())
        .collect();
    assert_eq!(actions, vec!["USER_CREATED", "USER_UPDATED", "USER_DELETED"]);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    let (status, doc) = send_json(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/users/{user_id}"].is_object());
}
