/// Error handling for the API server
///
/// Handlers return `Result<T, ApiError>`, which converts to the HTTP
/// responses the web client expects:
///
/// - client errors carry a JSON body `{"msg": "..."}`
/// - validation failures carry `{"errores": [{"param": "...", "msg": "..."}]}`
/// - unexpected failures answer `500` with the plain-text body `Hubo un error`
///
/// # Example
///
/// ```
/// use tareas_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler(found: bool) -> ApiResult<Json<serde_json::Value>> {
///     if !found {
///         return Err(ApiError::BadRequest("Tarea no encontrada".to_string()));
///     }
///     Ok(Json(json!({ "msg": "Tarea eliminada" })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tareas_shared::{
    auth::{
        authorization::AuthzError, jwt::JwtError, middleware::AuthError, password::PasswordError,
    },
    store::StoreError,
};

/// Body sent with every `500` response
pub const INTERNAL_ERROR_BODY: &str = "Hubo un error";

/// Message for a missing token
pub const MISSING_TOKEN_MSG: &str = "No hay Token, permiso no válido";

/// Message for a rejected token
pub const INVALID_TOKEN_MSG: &str = "Token no válido";

/// Message for an ownership failure
pub const NOT_AUTHORIZED_MSG: &str = "No autorizado";

/// Message for an unknown project
pub const PROJECT_NOT_FOUND_MSG: &str = "Proyecto no encontrado";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400), also used for unknown tasks and projects
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Validation errors (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub param: String,

    /// Error message
    pub msg: String,
}

/// Plain message response, used for errors and confirmations alike
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Validation failure response
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub errores: Vec<ValidationErrorDetail>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ValidationError(errores) => {
                return (StatusCode::BAD_REQUEST, Json(ValidationResponse { errores }))
                    .into_response();
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                return (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response();
            }
        };

        (status, Json(MessageResponse { msg })).into_response()
    }
}

/// Convert validator output to API errors
///
/// Fields are reported in name order so responses are stable.
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    param: field.to_string(),
                    msg: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Valor no válido".to_string()),
                })
            })
            .collect();

        errors.sort_by(|a, b| a.param.cmp(&b.param));
        ApiError::ValidationError(errors)
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(constraint) => {
                ApiError::BadRequest(format!("Constraint violation: {}", constraint))
            }
            StoreError::Database(err) => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert authentication errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ApiError::Unauthorized(MISSING_TOKEN_MSG.to_string()),
            AuthError::InvalidToken(reason) => {
                tracing::debug!(reason = %reason, "Rejected token");
                ApiError::Unauthorized(INVALID_TOKEN_MSG.to_string())
            }
        }
    }
}

/// Convert authorization errors to API errors
///
/// Unknown projects map to `400`; handlers that report them differently
/// match on `AuthzError::ProjectNotFound` before converting.
impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::ProjectNotFound => ApiError::BadRequest(PROJECT_NOT_FOUND_MSG.to_string()),
            AuthzError::NotOwner => ApiError::Unauthorized(NOT_AUTHORIZED_MSG.to_string()),
            AuthzError::Store(err) => err.into(),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert JWT errors to API errors
///
/// Reached only when signing fails, validation goes through `AuthError`.
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::InternalError(format!("Token operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "El nombre es obligatorio"))]
        nombre: String,

        #[validate(email(message = "Agrega un email válido"))]
        email: String,
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Tarea no encontrada".to_string());
        assert_eq!(err.to_string(), "Bad request: Tarea no encontrada");

        let err = ApiError::NotFound("Proyecto no encontrado".to_string());
        assert_eq!(err.to_string(), "Not found: Proyecto no encontrado");
    }

    #[tokio::test]
    async fn test_client_error_body() {
        let response = ApiError::Unauthorized(NOT_AUTHORIZED_MSG.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, r#"{"msg":"No autorizado"}"#);
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque_text() {
        let response = ApiError::InternalError("connection reset".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Hubo un error");
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let sample = Sample {
            nombre: String::new(),
            email: "no-es-email".to_string(),
        };

        let err: ApiError = sample.validate().unwrap_err().into();
        match &err {
            ApiError::ValidationError(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].param, "email");
                assert_eq!(errors[0].msg, "Agrega un email válido");
                assert_eq!(errors[1].param, "nombre");
                assert_eq!(errors[1].msg, "El nombre es obligatorio");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["errores"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_authz_conversion() {
        assert!(matches!(
            ApiError::from(AuthzError::ProjectNotFound),
            ApiError::BadRequest(msg) if msg == "Proyecto no encontrado"
        ));
        assert!(matches!(
            ApiError::from(AuthzError::NotOwner),
            ApiError::Unauthorized(msg) if msg == "No autorizado"
        ));
        assert!(matches!(
            ApiError::from(AuthzError::Store(StoreError::Database(sqlx::Error::PoolTimedOut))),
            ApiError::InternalError(_)
        ));
    }

    #[test]
    fn test_auth_conversion() {
        assert!(matches!(
            ApiError::from(AuthError::MissingCredentials),
            ApiError::Unauthorized(msg) if msg == MISSING_TOKEN_MSG
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidToken("Token expired".to_string())),
            ApiError::Unauthorized(msg) if msg == INVALID_TOKEN_MSG
        ));
    }
}
