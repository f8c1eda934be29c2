/// Project endpoints
///
/// Projects belong to the user who created them. Listing returns only the
/// caller's projects; renaming and deleting require ownership.
///
/// # Endpoints
///
/// - `POST /api/proyectos` - Create a project
/// - `GET /api/proyectos` - List the caller's projects, newest first
/// - `PUT /api/proyectos/:id` - Rename a project
/// - `DELETE /api/proyectos/:id` - Delete a project and its tasks

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, MessageResponse, PROJECT_NOT_FOUND_MSG},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tareas_shared::{
    auth::{
        authorization::{authorize_project, AuthzError},
        middleware::AuthUser,
    },
    models::project::{CreateProject, Project},
};
use validator::Validate;

/// Create/rename request
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    /// Project name
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre del Proyecto es obligatorio"))]
    pub nombre: String,
}

/// Single project response
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub proyecto: Project,
}

/// Project list response
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub proyectos: Vec<Project>,
}

/// Unknown projects are `404` on these routes
fn not_found_as_404(err: AuthzError) -> ApiError {
    match err {
        AuthzError::ProjectNotFound => ApiError::NotFound(PROJECT_NOT_FOUND_MSG.to_string()),
        other => other.into(),
    }
}

/// Create a project owned by the caller
///
/// # Response
///
/// `201 Created` with `{ "proyecto": { "_id", "nombre", "creador", "creado" } }`
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    req.validate()?;

    let proyecto = state
        .store
        .create_project(CreateProject {
            name: req.nombre,
            creator_id: auth.id,
        })
        .await?;

    tracing::info!(project_id = %proyecto.id, user_id = %auth.id, "Project created");

    Ok((StatusCode::CREATED, Json(ProjectResponse { proyecto })))
}

/// List the caller's projects, newest first
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<ProjectListResponse>> {
    let proyectos = state.store.list_projects_by_creator(auth.id).await?;

    Ok(Json(ProjectListResponse { proyectos }))
}

/// Rename a project
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Caller did not create the project
/// - `404 Not Found`: Unknown project
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    req.validate()?;

    let project = authorize_project(&*state.store, Some(&id), &auth)
        .await
        .map_err(not_found_as_404)?;

    let proyecto = state
        .store
        .rename_project(project.id, &req.nombre)
        .await?
        .ok_or_else(|| ApiError::NotFound(PROJECT_NOT_FOUND_MSG.to_string()))?;

    Ok(Json(ProjectResponse { proyecto }))
}

/// Delete a project together with its tasks
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let project = authorize_project(&*state.store, Some(&id), &auth)
        .await
        .map_err(not_found_as_404)?;

    if !state.store.delete_project(project.id).await? {
        return Err(ApiError::NotFound(PROJECT_NOT_FOUND_MSG.to_string()));
    }

    tracing::info!(project_id = %project.id, user_id = %auth.id, "Project deleted");

    Ok(Json(MessageResponse::new("Proyecto eliminado")))
}
