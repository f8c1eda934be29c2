/// In-memory store backend
///
/// Keeps all records in process memory behind a single tokio `RwLock`.
/// Suitable for tests and single-process development runs; data is lost on
/// restart.
///
/// Mirrors the PostgreSQL schema's constraints: emails are unique, tasks
/// require an existing project, and deleting a project deletes its tasks.
/// Records created within the same clock tick are listed newest first.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    project::{CreateProject, Project},
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// Insertion order is preserved so equal timestamps sort newest first.
    projects: Vec<Project>,
    tasks: Vec<Task>,
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; later insertions win ties.
fn newest_first<T>(mut rows: Vec<T>, key: impl Fn(&T) -> i64) -> Vec<T> {
    rows.reverse();
    rows.sort_by_key(|row| std::cmp::Reverse(key(row)));
    rows
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict("users_email_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        let mut tables = self.tables.write().await;

        let project = Project {
            id: Uuid::new_v4(),
            name: data.name,
            creator_id: data.creator_id,
            created_at: Utc::now(),
        };
        tables.projects.push(project.clone());

        Ok(project)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn list_projects_by_creator(&self, creator_id: Uuid) -> StoreResult<Vec<Project>> {
        let tables = self.tables.read().await;
        let mine: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| p.creator_id == creator_id)
            .cloned()
            .collect();

        Ok(newest_first(mine, |p| p.created_at.timestamp_micros()))
    }

    async fn rename_project(&self, id: Uuid, name: &str) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;

        Ok(tables.projects.iter_mut().find(|p| p.id == id).map(|project| {
            project.name = name.to_string();
            project.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        let removed = tables.projects.len() < before;

        if removed {
            tables.tasks.retain(|t| t.project_id != id);
        }

        Ok(removed)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        if !tables.projects.iter().any(|p| p.id == data.project_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }

        let task = Task {
            id: Uuid::new_v4(),
            name: data.name,
            state: data.state,
            project_id: data.project_id,
            created_at: Utc::now(),
        };
        tables.tasks.push(task.clone());

        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        let tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();

        Ok(newest_first(tasks, |t| t.created_at.timestamp_micros()))
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;

        Ok(tables.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            data.apply(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);

        Ok(tables.tasks.len() < before)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
