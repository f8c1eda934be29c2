/// Task model and database operations
///
/// A task is a unit of work belonging to exactly one project. Its project is
/// set at creation and never changes; only the name and completion state can
/// be updated afterwards.
///
/// # State
///
/// ```text
/// false (pending) ⇄ true (complete)
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     state BOOLEAN NOT NULL DEFAULT FALSE,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tareas_shared::models::task::{CreateTask, Task, UpdateTask};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, project_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     name: "Elegir plataforma de pago".to_string(),
///     state: false,
///     project_id,
/// }).await?;
///
/// // Mark as complete
/// Task::update(&pool, task.id, UpdateTask { name: None, state: Some(true) }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Task name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Completion state (`false` = pending, `true` = complete)
    #[serde(rename = "estado")]
    pub state: bool,

    /// Owning project (immutable)
    #[serde(rename = "proyecto")]
    pub project_id: Uuid,

    /// When the task was created
    #[serde(rename = "creado")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task name
    pub name: String,

    /// Initial completion state
    pub state: bool,

    /// Owning project
    pub project_id: Uuid,
}

/// Input for updating a task
///
/// Only `Some` fields are written. There is deliberately no project field.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New name
    pub name: Option<String>,

    /// New completion state
    pub state: Option<bool>,
}

impl UpdateTask {
    /// Applies the update to an in-memory task
    pub fn apply(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(state) = self.state {
            task.state = state;
        }
    }
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist (foreign key) or the
    /// database operation fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, state, project_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, state, project_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.state)
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, state, project_id, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks of a project, most recent first
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, state, project_id, created_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's name and/or state
    ///
    /// Returns `None` if the task no longer exists.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET name = COALESCE($2, name),
                state = COALESCE($3, state)
            WHERE id = $1
            RETURNING id, name, state, project_id, created_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.state)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            name: "Diseñar logo".to_string(),
            state: false,
            project_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let mut task = sample_task();
        let project_id = task.project_id;

        UpdateTask { name: None, state: Some(true) }.apply(&mut task);
        assert_eq!(task.name, "Diseñar logo");
        assert!(task.state);

        UpdateTask { name: Some("Diseñar banner".to_string()), state: None }.apply(&mut task);
        assert_eq!(task.name, "Diseñar banner");
        assert!(task.state);
        assert_eq!(task.project_id, project_id);
    }

    #[test]
    fn test_task_wire_names() {
        let task = sample_task();
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["_id"], task.id.to_string());
        assert_eq!(json["nombre"], "Diseñar logo");
        assert_eq!(json["estado"], false);
        assert_eq!(json["proyecto"], task.project_id.to_string());
        assert!(json.get("creado").is_some());
    }
}
