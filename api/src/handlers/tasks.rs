use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use common::db::repositories::project::ProjectRepository;
use common::db::repositories::task::TaskRepository;
use common::errors::DatabaseError;
use common::models::{Task, UserClaims};
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{authenticated_user_id, ErrorResponse, SuccessResponse};
use crate::state::AppState;

/// Request to create a new task inside a project
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Request to update an existing task
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
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

/// Create a task under a project the authenticated user owns
#[tracing::instrument(skip(state, req))]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<SuccessResponse<Task>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;
    validate_title(&req.title)?;

    // Ownership check before the insert so a foreign project id reads as
    // missing rather than forbidden.
    let project_repo = ProjectRepository::new(state.db_pool.clone());
    project_repo
        .find_by_id_for_user(project_id, user_id)
        .await
        .map_err(|e| {
            ErrorResponse::new("database_error", format!("Failed to fetch project: {}", e))
        })?
        .ok_or_else(|| {
            ErrorResponse::new("not_found", format!("Project not found: {}", project_id))
        })?;

    let task = Task {
        id: Uuid::new_v4(),
        project_id,
        title: req.title,
        description: req.description,
        due_date: req.due_date,
        is_completed: false,
        created_at: Utc::now(),
    };

    let task_repo = TaskRepository::new(state.db_pool.clone());
    task_repo.create(&task).await.map_err(|e| {
        ErrorResponse::new("database_error", format!("Failed to create task: {}", e))
    })?;

    tracing::info!(task_id = %task.id, project_id = %project_id, "Task created");
    Ok(Json(SuccessResponse::new(task)))
}

/// Get one task
#[tracing::instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<Task>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;

    let repo = TaskRepository::new(state.db_pool.clone());
    let task = repo
        .find_by_id_for_user(id, user_id)
        .await
        .map_err(|e| {
            ErrorResponse::new("database_error", format!("Failed to fetch task: {}", e))
        })?
        .ok_or_else(|| ErrorResponse::new("not_found", format!("Task not found: {}", id)))?;

    Ok(Json(SuccessResponse::new(task)))
}

/// Update a task's fields, including completion state
#[tracing::instrument(skip(state, req))]
pub async fn update_task(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<SuccessResponse<Uuid>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;
    validate_title(&req.title)?;

    let repo = TaskRepository::new(state.db_pool.clone());
    repo.update(
        id,
        user_id,
        &req.title,
        req.description.as_deref(),
        req.due_date,
        req.is_completed,
    )
    .await
    .map_err(|e| match e {
        DatabaseError::NotFound(_) => {
            ErrorResponse::new("not_found", format!("Task not found: {}", id))
        }
        _ => ErrorResponse::new("database_error", format!("Failed to update task: {}", e)),
    })?;

    Ok(Json(SuccessResponse::new(id)))
}

/// Delete a task
#[tracing::instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<Uuid>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;

    let repo = TaskRepository::new(state.db_pool.clone());
    repo.delete(id, user_id).await.map_err(|e| match e {
        DatabaseError::NotFound(_) => {
            ErrorResponse::new("not_found", format!("Task not found: {}", id))
        }
        _ => ErrorResponse::new("database_error", format!("Failed to delete task: {}", e)),
    })?;

    tracing::info!(task_id = %id, "Task deleted");
    Ok(Json(SuccessResponse::new(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_deserialization() {
        let json = r#"{"title": "Write copy", "due_date": "2026-02-10"}"#;
        let req: CreateTaskRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Write copy");
        assert_eq!(
            req.due_date,
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
        assert!(req.description.is_none());
    }

    #[test]
    fn test_update_task_request_defaults_incomplete() {
        let json = r#"{"title": "Write copy"}"#;
        let req: UpdateTaskRequest = serde_json::from_str(json).unwrap();
        assert!(!req.is_completed);
        assert!(req.due_date.is_none());
    }

    #[test]
    fn test_title_validation() {
        assert!(validate_title("ok").is_ok());
        assert!(validate_title(" ").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
    }
}
