/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth` - Login and get a token
/// - `GET /api/auth` - Current user for the presented token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, INVALID_TOKEN_MSG},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tareas_shared::{
    auth::{jwt, middleware::AuthUser, password},
    models::user::User,
};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    #[validate(email(message = "Agrega un email válido"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 6, message = "El password debe ser mínimo de 6 caracteres"))]
    pub password: String,
}

/// Token response, shared with registration
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT
    pub token: String,
}

/// Current user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub usuario: User,
}

/// Issues a token for `user_id` with the configured lifetime
pub(crate) fn issue_token(state: &AppState, user_id: uuid::Uuid) -> ApiResult<TokenResponse> {
    let token = jwt::create_token(&state.claims_for(user_id)?, state.jwt_secret())?;
    Ok(TokenResponse { token })
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /api/auth
/// Content-Type: application/json
///
/// {
///   "email": "ana@example.com",
///   "password": "secreto123"
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, unknown email or wrong password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let user = state
        .store
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("El usuario no existe".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(ApiError::BadRequest("Password Incorrecto".to_string()));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(issue_token(&state, user.id)?))
}

/// Returns the authenticated user
///
/// A valid token whose user no longer exists is treated as invalid.
pub async fn authenticated_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    let usuario = state
        .store
        .find_user(auth.id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_TOKEN_MSG.to_string()))?;

    Ok(Json(UserResponse { usuario }))
}
