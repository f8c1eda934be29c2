/// PostgreSQL store backend
///
/// Thin adapter from the [`Store`] trait to the model queries, translating
/// unique-constraint violations into [`StoreError::Conflict`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    project::{CreateProject, Project},
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing pool (see [`crate::db::pool::create_pool`])
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_db_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(constraint) = db_err.constraint() {
            if db_err.is_unique_violation() {
                return StoreError::Conflict(constraint.to_string());
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PostgresStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        User::create(&self.pool, data).await.map_err(map_db_error)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        Project::create(&self.pool, data).await.map_err(map_db_error)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(Project::find_by_id(&self.pool, id).await?)
    }

    async fn list_projects_by_creator(&self, creator_id: Uuid) -> StoreResult<Vec<Project>> {
        Ok(Project::list_by_creator(&self.pool, creator_id).await?)
    }

    async fn rename_project(&self, id: Uuid, name: &str) -> StoreResult<Option<Project>> {
        Ok(Project::rename(&self.pool, id, name).await?)
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        Ok(Project::delete(&self.pool, id).await?)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        Task::create(&self.pool, data).await.map_err(map_db_error)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(Task::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        Ok(Task::list_by_project(&self.pool, project_id).await?)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        Ok(Task::update(&self.pool, id, data).await?)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        Ok(Task::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}
