/// Registration endpoint
///
/// - `POST /api/usuarios` - Create an account and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::{issue_token, TokenResponse},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tareas_shared::{
    auth::password,
    models::user::CreateUser,
    store::StoreError,
};
use validator::Validate;

const USER_EXISTS_MSG: &str = "El usuario ya existe";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,

    /// Email address
    #[serde(default)]
    #[validate(email(message = "Agrega un email válido"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 6, message = "El password debe ser mínimo de 6 caracteres"))]
    pub password: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/usuarios
/// Content-Type: application/json
///
/// {
///   "nombre": "Ana",
///   "email": "ana@example.com",
///   "password": "secreto123"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "token": "eyJ..." }`
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or email already registered
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    if state.store.find_user_by_email(&req.email).await?.is_some() {
        return Err(ApiError::BadRequest(USER_EXISTS_MSG.to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    // A concurrent registration can still win the race to the unique index
    let user = state
        .store
        .create_user(CreateUser {
            name: req.nombre,
            email: req.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => ApiError::BadRequest(USER_EXISTS_MSG.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(issue_token(&state, user.id)?)))
}
