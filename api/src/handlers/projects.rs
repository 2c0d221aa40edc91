use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use common::db::repositories::project::{ProjectRepository, ProjectWithTaskCount};
use common::db::repositories::task::TaskRepository;
use common::errors::DatabaseError;
use common::models::{Project, Task, UserClaims};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{authenticated_user_id, ErrorResponse, SuccessResponse};
use crate::state::AppState;

/// Request to create a new project
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
}

/// Request to update an existing project
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: String,
    pub description: Option<String>,
}

/// Project detail with its tasks
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

fn validate_title(title: &str) -> Result<(), ErrorResponse> {
    if title.trim().is_empty() {
        return Err(ErrorResponse::new("validation_error", "Title is required"));
    }
    if title.len() > 200 {
        return Err(ErrorResponse::new(
            "validation_error",
            "Title must be at most 200 characters",
        ));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), ErrorResponse> {
    if let Some(description) = description {
        if description.len() > 1000 {
            return Err(ErrorResponse::new(
                "validation_error",
                "Description must be at most 1000 characters",
            ));
        }
    }
    Ok(())
}

/// Create a new project owned by the authenticated user
#[tracing::instrument(skip(state, req))]
pub async fn create_project(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<SuccessResponse<Project>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;
    validate_title(&req.title)?;
    validate_description(req.description.as_deref())?;

    let project = Project {
        id: Uuid::new_v4(),
        title: req.title,
        description: req.description,
        user_id,
        created_at: Utc::now(),
    };

    let repo = ProjectRepository::new(state.db_pool.clone());
    repo.create(&project).await.map_err(|e| {
        ErrorResponse::new("database_error", format!("Failed to create project: {}", e))
    })?;

    tracing::info!(project_id = %project.id, "Project created");
    Ok(Json(SuccessResponse::new(project)))
}

/// List the authenticated user's projects, newest first, with task counts
#[tracing::instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
) -> Result<Json<SuccessResponse<Vec<ProjectWithTaskCount>>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;

    let repo = ProjectRepository::new(state.db_pool.clone());
    let projects = repo.find_by_user(user_id).await.map_err(|e| {
        ErrorResponse::new("database_error", format!("Failed to fetch projects: {}", e))
    })?;

    tracing::debug!(count = projects.len(), "Listed projects");
    Ok(Json(SuccessResponse::new(projects)))
}

/// Get one project with its tasks
#[tracing::instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<ProjectDetailResponse>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;

    let repo = ProjectRepository::new(state.db_pool.clone());
    let project = repo
        .find_by_id_for_user(id, user_id)
        .await
        .map_err(|e| {
            ErrorResponse::new("database_error", format!("Failed to fetch project: {}", e))
        })?
        .ok_or_else(|| ErrorResponse::new("not_found", format!("Project not found: {}", id)))?;

    let task_repo = TaskRepository::new(state.db_pool.clone());
    let tasks = task_repo.find_by_project(id).await.map_err(|e| {
        ErrorResponse::new("database_error", format!("Failed to fetch tasks: {}", e))
    })?;

    Ok(Json(SuccessResponse::new(ProjectDetailResponse {
        project,
        tasks,
    })))
}

/// Update a project's title and description
#[tracing::instrument(skip(state, req))]
pub async fn update_project(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<SuccessResponse<Uuid>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;
    validate_title(&req.title)?;
    validate_description(req.description.as_deref())?;

    let repo = ProjectRepository::new(state.db_pool.clone());
    repo.update(id, user_id, &req.title, req.description.as_deref())
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => {
                ErrorResponse::new("not_found", format!("Project not found: {}", id))
            }
            _ => ErrorResponse::new("database_error", format!("Failed to update project: {}", e)),
        })?;

    Ok(Json(SuccessResponse::new(id)))
}

/// Delete a project and its tasks
#[tracing::instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<Uuid>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;

    let repo = ProjectRepository::new(state.db_pool.clone());
    repo.delete(id, user_id).await.map_err(|e| match e {
        DatabaseError::NotFound(_) => {
            ErrorResponse::new("not_found", format!("Project not found: {}", id))
        }
        _ => ErrorResponse::new("database_error", format!("Failed to delete project: {}", e)),
    })?;

    tracing::info!(project_id = %id, "Project deleted");
    Ok(Json(SuccessResponse::new(id)))
}
