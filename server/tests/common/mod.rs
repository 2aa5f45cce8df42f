// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use employee_server::{
    config::AppConfig,
    http::{AppState, build_router},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::DbPool;
use sea_orm::Database;
use serde_json::Value;
use tower::ServiceExt;

/// A fresh in-memory database with the real schema applied.
pub async fn migrated_pool() -> DbPool {
    let pool = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    pool
}

pub struct TestApp {
    router: Router,
    pub pool: DbPool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = migrated_pool().await;
        let state = AppState::new(pool.clone(), Arc::new(AppConfig::default()));
        Self {
            router: build_router(state),
            pool,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            request_id,
            body: body.to_vec(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}
