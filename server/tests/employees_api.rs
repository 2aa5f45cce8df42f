//! End-to-end tests: HTTP router, use case, repository and a migrated
//! in-memory database.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
};
use common::{TestApp, migrated_pool};
use employee_server::{
    config::AppConfig,
    http::{AppState, build_router},
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn rama() -> Value {
    json!({
        "FirstName": "Rama",
        "LastName": "Widhiantito",
        "Email": "rama.widhiantito@gmail.com",
        "HireDate": "2023-12-16T00:00:00Z"
    })
}

fn jane() -> Value {
    json!({
        "FirstName": "Jane",
        "LastName": "Smith",
        "Email": "jane.smith@example.com",
        "HireDate": "2024-02-01T09:30:00Z"
    })
}

fn without_id(mut employee: Value) -> Value {
    employee.as_object_mut().unwrap().remove("ID");
    employee
}

#[tokio::test]
async fn created_employee_can_be_fetched_back() {
    let app = TestApp::new().await;

    let created = app.send(Method::POST, "/employees/", Some(rama())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    let id = created["ID"].as_u64().unwrap();
    assert!(id > 0);

    let fetched = app.send(Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);
    assert_eq!(without_id(fetched.json()), rama());
}

#[tokio::test]
async fn create_ignores_a_client_supplied_id() {
    let app = TestApp::new().await;
    let mut payload = rama();
    payload["ID"] = json!(500);

    let created = app.send(Method::POST, "/employees", Some(payload)).await.json();
    assert_eq!(created["ID"], json!(1));

    let missing = app.send(Method::GET, "/employees/500", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_table_lists_as_empty_array() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/employees/", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"[]");
}

#[tokio::test]
async fn list_returns_employees_in_id_order() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/employees/", Some(rama())).await;
    app.send(Method::POST, "/employees/", Some(jane())).await;

    let listed = app.send(Method::GET, "/employees", None).await.json();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["ID"], json!(1));
    assert_eq!(without_id(listed[0].clone()), rama());
    assert_eq!(listed[1]["ID"], json!(2));
    assert_eq!(without_id(listed[1].clone()), jane());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_the_path_id() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/employees/", Some(rama())).await;

    let payload = json!({
        "ID": 99,
        "FirstName": "RamaUpdate",
        "LastName": "Widhiantito",
        "Email": "rama@example.com",
        "HireDate": "2024-01-02T03:04:05Z"
    });
    let updated = app.send(Method::PUT, "/employees/1", Some(payload)).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["ID"], json!(1));

    let fetched = app.send(Method::GET, "/employees/1", None).await.json();
    assert_eq!(
        fetched,
        json!({
            "ID": 1,
            "FirstName": "RamaUpdate",
            "LastName": "Widhiantito",
            "Email": "rama@example.com",
            "HireDate": "2024-01-02T03:04:05Z"
        })
    );
    let stray = app.send(Method::GET, "/employees/99", None).await;
    assert_eq!(stray.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn array_bodies_leave_the_table_untouched() {
    let app = TestApp::new().await;
    let stored = app.send(Method::POST, "/employees/", Some(rama())).await.json();

    let wipe = app.send(Method::PUT, "/employees/1", Some(json!([]))).await;
    assert_eq!(wipe.status, StatusCode::BAD_REQUEST);
    assert_eq!(wipe.json(), json!({"error": "Invalid input data"}));

    let positional = json!([0, "Seq", "Body", "s@b.c", "2023-12-16T00:00:00Z"]);
    let replaced = app
        .send(Method::PUT, "/employees/1", Some(positional.clone()))
        .await;
    assert_eq!(replaced.status, StatusCode::BAD_REQUEST);
    let created = app.send(Method::POST, "/employees/", Some(positional)).await;
    assert_eq!(created.status, StatusCode::BAD_REQUEST);
    let created = app.send(Method::POST, "/employees/", Some(json!([]))).await;
    assert_eq!(created.status, StatusCode::BAD_REQUEST);

    let listed = app.send(Method::GET, "/employees", None).await.json();
    assert_eq!(listed, json!([stored]));
}

#[tokio::test]
async fn keys_are_matched_without_regard_to_case() {
    let app = TestApp::new().await;

    let payload = json!({
        "firstName": "Rama",
        "lastname": "Widhiantito",
        "EMAIL": "rama.widhiantito@gmail.com",
        "hireDate": "2023-12-16T00:00:00Z"
    });
    let created = app.send(Method::POST, "/employees/", Some(payload)).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let fetched = app.send(Method::GET, "/employees/1", None).await.json();
    assert_eq!(without_id(fetched), rama());
}

#[tokio::test]
async fn update_of_a_missing_employee_is_a_server_error() {
    let app = TestApp::new().await;

    let response = app.send(Method::PUT, "/employees/42", Some(rama())).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({"error": "Failed to update employee"}));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/employees/", Some(rama())).await;

    let deleted = app.send(Method::DELETE, "/employees/1", None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let fetched = app.send(Method::GET, "/employees/1", None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.json(), json!({"error": "Employee not found"}));

    let again = app.send(Method::DELETE, "/employees/1", None).await;
    assert_eq!(again.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(again.json(), json!({"error": "Failed to delete employee"}));
}

#[tokio::test]
async fn ids_beyond_storage_range_are_not_found() {
    let app = TestApp::new().await;

    let response = app
        .send(Method::GET, "/employees/18446744073709551615", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_ids_are_rejected_on_every_id_route() {
    let app = TestApp::new().await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = app
            .send(method.clone(), "/employees/invalid", Some(rama()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(response.json(), json!({"error": "Invalid employee ID"}));
    }
}

#[tokio::test]
async fn health_reports_database_status() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["db_ok"], json!(true));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/employees", None).await;
    assert!(response.request_id.is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn cors_allows_only_configured_origins() {
    let config = AppConfig {
        cors_allowed_origins: vec![HeaderValue::from_static("https://hr.example.com")],
    };
    let router = build_router(AppState::new(migrated_pool().await, Arc::new(config)));

    for (origin, allowed) in [("https://hr.example.com", true), ("https://evil.example.com", false)] {
        let request = Request::builder()
            .uri("/employees")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let echoed = response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN);
        assert_eq!(echoed.is_some(), allowed, "{origin}");
    }
}
