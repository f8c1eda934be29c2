/// Integration tests for registration, login and the token layer

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Duration;
use common::{TestContext, JWT_SECRET, PASSWORD};
use serde_json::json;
use tareas_api::app::{build_router, AppState};
use tareas_shared::auth::jwt::{create_token, validate_token, Claims};
use tareas_shared::auth::middleware::AUTH_TOKEN_HEADER;
use uuid::Uuid;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
    assert_eq!(response.json()["database"], "connected");
}

#[tokio::test]
async fn test_register_returns_token() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/api/usuarios",
            None,
            Some(json!({ "nombre": "Carla", "email": "carla@example.com", "password": "secreto123" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let token = response.json()["token"].as_str().unwrap().to_string();
    let claims = validate_token(&token, JWT_SECRET).unwrap();

    let me = ctx
        .send(Method::GET, "/api/auth", Some(&token), None)
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["usuario"]["_id"], claims.sub.to_string());
    assert_eq!(me.json()["usuario"]["nombre"], "Carla");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/api/usuarios",
            None,
            Some(json!({ "nombre": "Ana", "email": ctx.owner.email, "password": "secreto123" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.msg(), "El usuario ya existe");
}

#[tokio::test]
async fn test_register_validation() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/api/usuarios",
            None,
            Some(json!({ "email": "no-es-email", "password": "123" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({
            "errores": [
                { "param": "email", "msg": "Agrega un email válido" },
                { "param": "nombre", "msg": "El nombre es obligatorio" },
                { "param": "password", "msg": "El password debe ser mínimo de 6 caracteres" }
            ]
        })
    );
}

#[tokio::test]
async fn test_login() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": ctx.owner.email, "password": PASSWORD })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let token = response.json()["token"].as_str().unwrap().to_string();
    assert_eq!(validate_token(&token, JWT_SECRET).unwrap().sub, ctx.owner.id);
}

#[tokio::test]
async fn test_login_failures() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": "nadie@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.msg(), "El usuario no existe");

    let response = ctx
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": ctx.owner.email, "password": "otro-password" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.msg(), "Password Incorrecto");
}

#[tokio::test]
async fn test_current_user_hides_password() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(Method::GET, "/api/auth", Some(&ctx.owner_token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let usuario = &response.json()["usuario"];
    assert_eq!(usuario["email"], ctx.owner.email.as_str());
    assert!(usuario.get("password_hash").is_none());
    assert!(!response.body.contains("argon2"));
}

#[tokio::test]
async fn test_token_for_unknown_user() {
    let ctx = TestContext::new().await.unwrap();
    let token = create_token(&Claims::new(Uuid::new_v4()), JWT_SECRET).unwrap();

    let response = ctx.send(Method::GET, "/api/auth", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.msg(), "Token no válido");
}

#[tokio::test]
async fn test_expired_and_foreign_tokens_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let expired = create_token(
        &Claims::with_expiration(ctx.owner.id, Duration::seconds(-60)).unwrap(),
        JWT_SECRET,
    )
    .unwrap();
    let foreign = create_token(
        &Claims::new(ctx.owner.id),
        "another-secret-key-at-least-32-bytes",
    )
    .unwrap();

    for token in [expired, foreign] {
        let response = ctx
            .send(Method::GET, "/api/proyectos", Some(&token), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.msg(), "Token no válido");
    }
}

#[tokio::test]
async fn test_missing_token() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(Method::GET, "/api/auth", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json(),
        json!({ "msg": "No hay Token, permiso no válido" })
    );
}

#[tokio::test]
async fn test_legacy_token_header() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/proyectos")
        .header(AUTH_TOKEN_HEADER, &ctx.owner_token)
        .body(Body::empty())
        .unwrap();

    let response = ctx.call(request).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "proyectos": [] }));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/proyectos")
        .header(header::AUTHORIZATION, format!("Basic {}", ctx.owner_token))
        .body(Body::empty())
        .unwrap();

    let response = ctx.call(request).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.msg(), "Token no válido");
}

#[tokio::test]
async fn test_lowercase_bearer_scheme() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth")
        .header(header::AUTHORIZATION, format!("bearer {}", ctx.owner_token))
        .body(Body::empty())
        .unwrap();

    let response = ctx.call(request).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.json()["usuario"]["email"], ctx.owner.email.as_str());
}

#[tokio::test]
async fn test_unrepresentable_token_lifetime_fails_cleanly() {
    let ctx = TestContext::new().await.unwrap();

    let mut config = ctx.config.clone();
    config.jwt.expiration_seconds = i64::MAX;
    let app = build_router(AppState::new(ctx.store.clone(), config));
    let ctx = TestContext { app, ..ctx };

    let response = ctx
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({ "email": ctx.owner.email, "password": PASSWORD })),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Hubo un error");
}
