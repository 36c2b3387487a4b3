//! HTTP client for driving the router in-process.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use directory_core::kernel::ServerDeps;
use directory_core::server::{build_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub struct HttpClient {
    router: Router,
    token: Option<String>,
}

pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl HttpClient {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            router: build_app(AppState::new(deps, None), &[]),
            token: None,
        }
    }

    /// Send every following request with a token for `subject`.
    pub fn signed_in(mut self, deps: &ServerDeps, subject: &str, is_admin: bool) -> Self {
        let token = deps
            .jwt_service
            .create_token(subject, is_admin)
            .expect("Failed to create test token");
        self.token = Some(token);
        self
    }

    pub async fn get(&self, uri: &str) -> HttpResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> HttpResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> HttpResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> HttpResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> HttpResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        HttpResponse { status, body }
    }
}
