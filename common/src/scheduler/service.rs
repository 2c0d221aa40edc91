// Scheduling service
//
// Wires the pure engine to persistence: verify project ownership, load the
// incomplete tasks in creation order, run one scheduling pass, and persist
// the resulting due dates in a single transaction. The repositories are
// injected; the service holds no state across calls.

use crate::db::repositories::{DueDateAssignment, ProjectRepository, TaskRepository};
use crate::errors::SchedulerError;
use crate::scheduler::engine::{schedule_tasks, ScheduleOutcome, ScheduleWindow};
use metrics::{counter, histogram};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Per-request entry point for task auto-scheduling
#[derive(Clone)]
pub struct SchedulerService {
    project_repo: Arc<ProjectRepository>,
    task_repo: Arc<TaskRepository>,
}

impl SchedulerService {
    /// Create a new scheduling service over the given repositories
    pub fn new(project_repo: ProjectRepository, task_repo: TaskRepository) -> Self {
        Self {
            project_repo: Arc::new(project_repo),
            task_repo: Arc::new(task_repo),
        }
    }

    /// Schedule all incomplete tasks of a project owned by `user_id`.
    ///
    /// Fails with `SchedulerError::AccessDenied` before any task is loaded
    /// when the project does not exist or belongs to another user. The
    /// engine itself never fails; a project with no incomplete tasks yields
    /// a zero-effect outcome and nothing is written.
    #[instrument(skip(self, window), fields(project_id = %project_id, user_id = %user_id))]
    pub async fn schedule_project_tasks(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        window: ScheduleWindow,
    ) -> Result<ScheduleOutcome, SchedulerError> {
        // Ownership check comes first; an unauthorized caller learns nothing
        // about the project's tasks.
        self.project_repo
            .find_by_id_for_user(project_id, user_id)
            .await?
            .ok_or(SchedulerError::AccessDenied)?;

        let tasks = self.task_repo.find_incomplete_ordered(project_id).await?;

        let outcome = schedule_tasks(&tasks, &window);

        if outcome.tasks_scheduled > 0 {
            let assignments: Vec<DueDateAssignment> = outcome
                .scheduled_tasks
                .iter()
                .map(|t| DueDateAssignment {
                    task_id: t.id,
                    due_date: t.due_date,
                })
                .collect();

            self.task_repo.persist_due_dates(&assignments).await?;
        }

        counter!("schedule_runs_total", "outcome" => if outcome.tasks_scheduled > 0 { "scheduled" } else { "empty" }).increment(1);
        histogram!("schedule_tasks_count").record(outcome.tasks_scheduled as f64);

        tracing::info!(
            project_id = %project_id,
            tasks_scheduled = outcome.tasks_scheduled,
            "Scheduling pass completed"
        );

        Ok(outcome)
    }
}
