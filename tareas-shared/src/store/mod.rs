/// Storage abstraction for users, projects and tasks
///
/// Handlers depend on the [`Store`] trait rather than on a concrete database
/// so that the same request logic runs against PostgreSQL in production and
/// against an in-memory backend in tests and local development.
///
/// # Backends
///
/// - [`postgres::PostgresStore`]: sqlx over a `PgPool`, delegating to the
///   queries in [`crate::models`]
/// - [`memory::MemoryStore`]: process-local maps behind a tokio `RwLock`
///
/// # Semantics
///
/// Lookups return `Ok(None)` for absent records; only unexpected failures
/// are errors. Listing operations return records newest first. Deleting a
/// project deletes its tasks.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tareas_shared::store::{memory::MemoryStore, Store};
///
/// # async fn example() -> Result<(), tareas_shared::store::StoreError> {
/// let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
/// store.health_check().await?;
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    project::{CreateProject, Project},
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint was violated (e.g., duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations needed by the API
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates a user; fails with `Conflict` if the email is taken
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Finds a user by ID
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Finds a user by email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Creates a project
    async fn create_project(&self, data: CreateProject) -> StoreResult<Project>;

    /// Finds a project by ID
    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Lists the projects created by a user, newest first
    async fn list_projects_by_creator(&self, creator_id: Uuid) -> StoreResult<Vec<Project>>;

    /// Renames a project; `None` if it does not exist
    async fn rename_project(&self, id: Uuid, name: &str) -> StoreResult<Option<Project>>;

    /// Deletes a project and its tasks; `false` if it did not exist
    async fn delete_project(&self, id: Uuid) -> StoreResult<bool>;

    /// Creates a task with a server-assigned ID and timestamp
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Finds a task by ID
    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Lists a project's tasks, newest first
    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Updates a task's name and/or state; `None` if it does not exist
    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>>;

    /// Deletes a task; `false` if it did not exist
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;

    /// Verifies the backend is reachable
    async fn health_check(&self) -> StoreResult<()>;
}
