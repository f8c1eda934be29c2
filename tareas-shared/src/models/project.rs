/// Project model and database operations
///
/// A project is a named collection of tasks owned by exactly one user, its
/// creator. The creator is recorded at creation time and never reassigned.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     creator_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tareas_shared::models::project::{CreateProject, Project};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let project = Project::create(&pool, CreateProject {
///     name: "Tienda virtual".to_string(),
///     creator_id: user_id,
/// }).await?;
///
/// let mine = Project::list_by_creator(&pool, user_id).await?;
/// assert_eq!(mine[0].id, project.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Project name
    #[serde(rename = "nombre")]
    pub name: String,

    /// User who created (and owns) the project
    #[serde(rename = "creador")]
    pub creator_id: Uuid,

    /// When the project was created
    #[serde(rename = "creado")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Owning user
    pub creator_id: Uuid,
}

impl Project {
    /// Creates a new project
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, creator_id)
            VALUES ($1, $2)
            RETURNING id, name, creator_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.creator_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, creator_id, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists a user's projects, most recent first
    pub async fn list_by_creator(pool: &PgPool, creator_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, creator_id, created_at
            FROM projects
            WHERE creator_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(creator_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Renames a project
    ///
    /// Returns `None` if the project no longer exists.
    pub async fn rename(pool: &PgPool, id: Uuid, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $2
            WHERE id = $1
            RETURNING id, name, creator_id, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// ⚠️  This also deletes all of the project's tasks due to CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_wire_names() {
        let creator = Uuid::new_v4();
        let project = Project {
            id: Uuid::new_v4(),
            name: "Intranet".to_string(),
            creator_id: creator,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["nombre"], "Intranet");
        assert_eq!(json["creador"], creator.to_string());
        assert!(json.get("_id").is_some());
        assert!(json.get("creado").is_some());
    }
}
