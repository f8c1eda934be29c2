/// Authentication gate
///
/// Turns the credential on an incoming request into an authenticated user
/// identity. Authentication is stateless: the token alone decides, there is
/// no session table or revocation list.
///
/// # Token Sources
///
/// 1. `Authorization: Bearer <token>`
/// 2. `x-auth-token: <token>` (header used by the existing web client)
///
/// # Request Extensions
///
/// On success the API's middleware layer inserts an [`AuthUser`] into the
/// request extensions, which handlers read with `Extension<AuthUser>`.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use tareas_shared::auth::jwt::{create_token, Claims};
/// use tareas_shared::auth::middleware::{authenticate, extract_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
///
/// let token = extract_token(&headers)?;
/// assert_eq!(authenticate(token, secret)?, user_id);
/// # Ok(())
/// # }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Legacy header carrying the raw token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated caller attached to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID taken from the token subject
    pub id: Uuid,
}

/// Error type for the authentication gate
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token was presented
    #[error("Missing credentials")]
    MissingCredentials,

    /// A token was presented but is not acceptable
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

/// Pulls the raw token out of the request headers
///
/// The `Authorization` header takes precedence. A non-Bearer `Authorization`
/// value is rejected rather than silently ignored.
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if neither header is present or the
///   token is empty
/// - `AuthError::InvalidToken` if `Authorization` uses another scheme
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Malformed authorization header".to_string()))?;

        // Auth schemes are case-insensitive (RFC 7235)
        let token = match value.trim_start().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => return Err(AuthError::InvalidToken("Expected Bearer token".to_string())),
        };

        return non_empty(token);
    }

    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?
        .trim();

    non_empty(token)
}

fn non_empty(token: &str) -> Result<&str, AuthError> {
    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(token)
}

/// Verifies a token and returns the user ID it was issued to
///
/// Pure function of the token and the secret.
pub fn authenticate(token: &str, secret: &str) -> Result<Uuid, AuthError> {
    let claims = validate_token(token, secret)?;
    Ok(claims.sub)
}
