//! Common test utilities for integration tests
//!
//! Every test gets its own router over a fresh in-memory store, seeded with
//! two users (`owner` and `other`) and a token for each.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tareas_api::app::{build_router, AppState};
use tareas_api::config::Config;
use tareas_shared::auth::jwt::{create_token, Claims};
use tareas_shared::auth::password::hash_password;
use tareas_shared::models::user::{CreateUser, User};
use tareas_shared::store::{memory::MemoryStore, Store};
use tower::Service as _;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";
pub const PASSWORD: &str = "secreto123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
    pub config: Config,
    pub owner: User,
    pub owner_token: String,
    pub other: User,
    pub other_token: String,
}

/// Status and raw body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Parses the body as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Body is not JSON ({}): {}", e, self.body))
    }

    /// The `msg` field of a JSON body
    pub fn msg(&self) -> String {
        self.json()["msg"].as_str().unwrap_or_default().to_string()
    }
}

impl TestContext {
    /// Creates a new test context with a fresh store
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_lookup(|key| match key {
            "STORE_BACKEND" => Some("memory".to_string()),
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            _ => None,
        })?;

        let store = Arc::new(MemoryStore::new());

        let owner = seed_user(&store, "Ana", "ana@example.com").await?;
        let other = seed_user(&store, "Beto", "beto@example.com").await?;

        let owner_token = create_token(&Claims::new(owner.id), JWT_SECRET)?;
        let other_token = create_token(&Claims::new(other.id), JWT_SECRET)?;

        let state = AppState::new(store.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            store,
            app,
            config,
            owner,
            owner_token,
            other,
            other_token,
        })
    }

    /// Sends a request, with an optional bearer token and JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.call(request).await
    }

    /// Sends a prebuilt request
    pub async fn call(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            body: String::from_utf8_lossy(&body).to_string(),
        }
    }

    /// Creates a project through the API and returns its ID
    pub async fn create_project(&self, token: &str, nombre: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/proyectos",
                Some(token),
                Some(serde_json::json!({ "nombre": nombre })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        response.json()["proyecto"]["_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Creates a task through the API and returns the `tarea` object
    pub async fn create_task(&self, token: &str, proyecto: &str, nombre: &str) -> Value {
        let response = self
            .send(
                Method::POST,
                "/api/tareas",
                Some(token),
                Some(serde_json::json!({ "proyecto": proyecto, "nombre": nombre })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        response.json()["tarea"].clone()
    }

    /// Reads a task straight from the store, bypassing the API
    pub async fn store_task(&self, id: &str) -> Value {
        let id = Uuid::parse_str(id).unwrap();
        let task = self.store.find_task(id).await.unwrap().expect("task should exist");
        serde_json::to_value(task).unwrap()
    }
}

async fn seed_user(store: &MemoryStore, name: &str, email: &str) -> anyhow::Result<User> {
    let user = store
        .create_user(CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(PASSWORD)?,
        })
        .await?;

    Ok(user)
}
