// Scheduling endpoint
//
// The request and response bodies use camelCase field names, unlike the rest
// of the API, to keep the wire format stable for existing clients.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use common::errors::SchedulerError;
use common::models::UserClaims;
use common::scheduler::{ScheduleOutcome, ScheduleWindow, ScheduledTask};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{authenticated_user_id, ErrorResponse, SuccessResponse};
use crate::state::AppState;

fn default_hours_per_day() -> i64 {
    8
}

fn default_work_days_per_week() -> u8 {
    5
}

/// Request to run one scheduling pass over a project's incomplete tasks
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: i64,
    #[serde(default = "default_work_days_per_week")]
    pub work_days_per_week: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskResponse {
    pub id: Uuid,
    pub title: String,
    pub due_date: NaiveDate,
    pub is_completed: bool,
}

impl From<ScheduledTask> for ScheduledTaskResponse {
    fn from(task: ScheduledTask) -> Self {
        Self {
            id: task.id,
            title: task.title,
            due_date: task.due_date,
            is_completed: task.is_completed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub scheduled_tasks: Vec<ScheduledTaskResponse>,
    pub message: String,
    pub tasks_scheduled: usize,
}

impl From<ScheduleOutcome> for ScheduleResponse {
    fn from(outcome: ScheduleOutcome) -> Self {
        Self {
            scheduled_tasks: outcome
                .scheduled_tasks
                .into_iter()
                .map(Into::into)
                .collect(),
            message: outcome.message,
            tasks_scheduled: outcome.tasks_scheduled,
        }
    }
}

fn validate_request(req: &ScheduleRequest) -> Result<(), ErrorResponse> {
    if !(1..=24).contains(&req.hours_per_day) {
        return Err(ErrorResponse::new(
            "validation_error",
            "hoursPerDay must be between 1 and 24",
        ));
    }
    if !(1..=7).contains(&req.work_days_per_week) {
        return Err(ErrorResponse::new(
            "validation_error",
            "workDaysPerWeek must be between 1 and 7",
        ));
    }
    Ok(())
}

/// Distribute due dates over the window for every incomplete task in the
/// project, persist them, and return the assignments
#[tracing::instrument(skip(state, req), fields(project_id = %project_id))]
pub async fn schedule_tasks(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<SuccessResponse<ScheduleResponse>>, ErrorResponse> {
    let user_id = authenticated_user_id(&claims)?;
    validate_request(&req)?;

    let window = ScheduleWindow {
        start_date: req.start_date,
        end_date: req.end_date,
        hours_per_day: req.hours_per_day,
        work_days_per_week: req.work_days_per_week,
    };

    let outcome = state
        .scheduler_service
        .schedule_project_tasks(project_id, user_id, window)
        .await
        .map_err(|e| match e {
            SchedulerError::AccessDenied => {
                ErrorResponse::new("forbidden", "Project not found or access denied")
            }
            SchedulerError::Database(e) => {
                tracing::error!(error = %e, "Scheduling pass failed");
                ErrorResponse::new("database_error", "Failed to schedule tasks")
            }
        })?;

    metrics::counter!("http_requests_total", "route" => "schedule", "status" => "ok")
        .increment(1);

    Ok(Json(SuccessResponse::new(outcome.into())))
}
