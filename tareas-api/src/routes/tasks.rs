/// Task endpoints
///
/// Every task belongs to a project, and only the project's creator may
/// create, list, change or delete its tasks. The project is always the one
/// named by the caller (`proyecto` in the body or query string). On update
/// and delete that caller-supplied project is what gets authorized, while
/// the task keeps the project it was created under.
///
/// # Endpoints
///
/// - `POST /api/tareas` - Create a task
/// - `GET /api/tareas?proyecto=<id>` - List a project's tasks, newest first
/// - `PUT /api/tareas/:id` - Change a task's name and/or state
/// - `DELETE /api/tareas/:id?proyecto=<id>` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, MessageResponse},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tareas_shared::{
    auth::{
        authorization::{authorize_project, AuthzError},
        middleware::AuthUser,
    },
    models::task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

const TASK_NOT_FOUND_MSG: &str = "Tarea no encontrada";

/// Create request
///
/// Fields other than these are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Owning project ID
    #[validate(required(message = "El proyecto es obligatorio"))]
    pub proyecto: Option<String>,

    /// Task name
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre de la tarea es obligatorio"))]
    pub nombre: String,

    /// Initial state, pending when omitted
    #[serde(default)]
    pub estado: bool,
}

/// Update request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// Project used for the ownership check
    pub proyecto: Option<String>,

    /// New name
    pub nombre: Option<String>,

    /// New state
    pub estado: Option<bool>,
}

/// Query string naming the project
#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub proyecto: Option<String>,
}

/// Single task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub tarea: Task,
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tareas: Vec<Task>,
}

fn task_not_found() -> ApiError {
    ApiError::BadRequest(TASK_NOT_FOUND_MSG.to_string())
}

/// Loads the task named in the path; malformed IDs count as unknown
async fn find_task(state: &AppState, id: &str) -> ApiResult<Task> {
    let id = Uuid::parse_str(id).map_err(|_| task_not_found())?;

    state.store.find_task(id).await?.ok_or_else(task_not_found)
}

/// Create a task in a project the caller owns
///
/// # Endpoint
///
/// ```text
/// POST /api/tareas
/// Content-Type: application/json
///
/// { "proyecto": "uuid", "nombre": "Comprar pan", "estado": false }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "tarea": { "_id", "nombre", "estado", "proyecto", "creado" } }`
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or unknown project
/// - `401 Unauthorized`: Caller did not create the project
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let project = authorize_project(&*state.store, req.proyecto.as_deref(), &auth).await?;

    let tarea = state
        .store
        .create_task(CreateTask {
            name: req.nombre,
            state: req.estado,
            project_id: project.id,
        })
        .await?;

    tracing::info!(task_id = %tarea.id, project_id = %project.id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse { tarea })))
}

/// List a project's tasks, newest first
///
/// # Errors
///
/// - `400 Bad Request`: Unknown project (`Tareas no encontradas`)
/// - `401 Unauthorized`: Caller did not create the project
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let project = authorize_project(&*state.store, query.proyecto.as_deref(), &auth)
        .await
        .map_err(|e| match e {
            AuthzError::ProjectNotFound => {
                ApiError::BadRequest("Tareas no encontradas".to_string())
            }
            other => other.into(),
        })?;

    let tareas = state.store.list_tasks_by_project(project.id).await?;

    Ok(Json(TaskListResponse { tareas }))
}

/// Change a task's name and/or state
///
/// Only the fields present in the body are written; the task's project
/// never changes.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown task or unknown project
/// - `401 Unauthorized`: Caller did not create the named project
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = find_task(&state, &id).await?;

    authorize_project(&*state.store, req.proyecto.as_deref(), &auth).await?;

    let tarea = state
        .store
        .update_task(
            task.id,
            UpdateTask {
                name: req.nombre,
                state: req.estado,
            },
        )
        .await?
        .ok_or_else(task_not_found)?;

    tracing::debug!(task_id = %tarea.id, "Task updated");

    Ok(Json(TaskResponse { tarea }))
}

/// Delete a task
///
/// # Errors
///
/// - `400 Bad Request`: Unknown task or unknown project
/// - `401 Unauthorized`: Caller did not create the named project
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let task = find_task(&state, &id).await?;

    authorize_project(&*state.store, query.proyecto.as_deref(), &auth).await?;

    if !state.store.delete_task(task.id).await? {
        return Err(task_not_found());
    }

    tracing::info!(task_id = %task.id, "Task deleted");

    Ok(Json(MessageResponse::new("Tarea eliminada")))
}
