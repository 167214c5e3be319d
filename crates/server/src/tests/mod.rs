// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod movie_routes;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use reelbase_api::{MovieDeletePolicy, ServiceConfig};
use reelbase_persistence::Persistence;

use crate::{AppState, build_router};

/// Helper to create a router over a fresh in-memory database.
pub fn create_test_app() -> Router {
    create_test_app_with(ServiceConfig::default())
}

pub fn create_test_app_with(config: ServiceConfig) -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState::new(persistence, config))
}

pub fn require_force_config() -> ServiceConfig {
    ServiceConfig {
        movie_delete_policy: MovieDeletePolicy::RequireForce,
        ..ServiceConfig::default()
    }
}

/// A response reduced to its status and body text.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request: Request<Body> = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> TestResponse {
    send(app, "POST", uri, Some(&body.to_string())).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &Value) -> TestResponse {
    send(app, "PATCH", uri, Some(&body.to_string())).await
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, "DELETE", uri, None).await
}

/// Creates an entity and returns its id.
pub async fn create_id(app: &Router, uri: &str, body: &Value) -> i64 {
    let response: TestResponse = post_json(app, uri, body).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.json()["id"].as_i64().unwrap()
}
