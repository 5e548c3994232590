#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Duration;
use http_body_util::BodyExt;
use resto_orderservice::{
    app_state::AppState, credentials::CredentialService, routes, store::MemoryStore,
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_ttl(Duration::hours(24)).await
}

pub async fn spawn_app_with_ttl(ttl: Duration) -> TestApp {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        CredentialService::new(SECRET, ttl),
    );
    state
        .admins
        .ensure_default_admin("admin", "admin123")
        .await
        .expect("Failed to create test admin");

    TestApp {
        app: routes::build_app(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).expect("Failed to build request"))
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };
        (status, body)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/admin/login",
                None,
                Some(json!({ "username": "admin", "password": "admin123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn create_menu(&self, token: &str, name: &str, price: i64, available: bool) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/admin/menu",
                Some(token),
                Some(json!({
                    "name": name,
                    "image": "",
                    "type": "Beverage",
                    "price": price,
                    "available": available
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create menu failed: {}", body);
        body
    }

    pub async fn create_user(&self, name: &str, email: &str, table_number: i32) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/users",
                None,
                Some(json!({ "name": name, "email": email, "table_number": table_number })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {}", body);
        body
    }
}
