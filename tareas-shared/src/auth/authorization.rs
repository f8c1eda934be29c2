/// Project ownership checks
///
/// Every project has exactly one creator, and only the creator may read or
/// modify the project and its tasks. This module is the single place that
/// rule is written down; every task and project handler goes through it.
///
/// # Permission Model
///
/// ```text
/// project.creator_id == authenticated_user.id  →  allowed
/// anything else                                →  NotOwner
/// ```
///
/// Task handlers authorize against the project identifier supplied by the
/// caller (body or query string), not the one stored on the task.
///
/// # Example
///
/// ```no_run
/// use tareas_shared::auth::authorization::authorize_project;
/// use tareas_shared::auth::middleware::AuthUser;
/// use tareas_shared::store::Store;
///
/// # async fn example(store: &dyn Store, user: AuthUser) -> Result<(), Box<dyn std::error::Error>> {
/// let project = authorize_project(store, Some("6f1c..."), &user).await?;
/// println!("{} may edit {}", user.id, project.name);
/// # Ok(())
/// # }
/// ```

use tracing::warn;
use uuid::Uuid;

use super::middleware::AuthUser;
use crate::models::project::Project;
use crate::store::{Store, StoreError};

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Project identifier absent, malformed, or unknown
    #[error("Project not found")]
    ProjectNotFound,

    /// Authenticated user is not the project's creator
    #[error("Not authorized to access this project")]
    NotOwner,

    /// Store lookup failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Returns true if `user` created `project`
pub fn is_owner(project: &Project, user: &AuthUser) -> bool {
    project.creator_id == user.id
}

/// Fails with `NotOwner` unless `user` created `project`
pub fn require_ownership(project: &Project, user: &AuthUser) -> Result<(), AuthzError> {
    if !is_owner(project, user) {
        warn!(
            project_id = %project.id,
            user_id = %user.id,
            "Rejected access to project owned by another user"
        );
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

/// Parses a caller-supplied project identifier
///
/// Absent or malformed identifiers cannot name an existing project, so they
/// are reported the same way as unknown ones.
pub fn parse_project_id(raw: Option<&str>) -> Result<Uuid, AuthzError> {
    raw.and_then(|id| Uuid::parse_str(id.trim()).ok())
        .ok_or(AuthzError::ProjectNotFound)
}

/// Resolves a caller-supplied project identifier and checks ownership
///
/// Existence is checked before ownership, so a caller probing someone
/// else's project ID sees `NotOwner` only for projects that exist.
///
/// # Errors
///
/// - `AuthzError::ProjectNotFound` if the identifier does not resolve
/// - `AuthzError::NotOwner` if the project belongs to someone else
/// - `AuthzError::Store` if the lookup fails
pub async fn authorize_project<S>(
    store: &S,
    project_id: Option<&str>,
    user: &AuthUser,
) -> Result<Project, AuthzError>
where
    S: Store + ?Sized,
{
    let project_id = parse_project_id(project_id)?;

    let project = store
        .find_project(project_id)
        .await?
        .ok_or(AuthzError::ProjectNotFound)?;

    require_ownership(&project, user)?;

    Ok(project)
}
