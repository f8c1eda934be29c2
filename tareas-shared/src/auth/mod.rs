/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 token creation and validation
/// - [`middleware`]: The request gate (token extraction and authentication)
/// - [`authorization`]: Project ownership checks shared by all handlers
///
/// # Example
///
/// ```
/// use tareas_shared::auth::jwt::{create_token, Claims};
/// use tareas_shared::auth::middleware::authenticate;
/// use tareas_shared::auth::password::{hash_password, verify_password};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secreto123")?;
/// assert!(verify_password("secreto123", &hash)?);
///
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), "secret-key")?;
/// assert_eq!(authenticate(&token, "secret-key")?, user_id);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
