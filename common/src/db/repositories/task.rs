// Task repository implementation
//
// Task reads and writes are scoped through project ownership: a task is only
// visible to the user who owns its project.

use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::Task;
use chrono::NaiveDate;
use tracing::instrument;
use uuid::Uuid;

/// One due-date assignment produced by the scheduler, ready to persist
#[derive(Debug, Clone, Copy)]
pub struct DueDateAssignment {
    pub task_id: Uuid,
    pub due_date: NaiveDate,
}

/// Repository for task-related database operations
#[derive(Clone)]
pub struct TaskRepository {
    pool: DbPool,
}

impl TaskRepository {
    /// Create a new TaskRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new task
    #[instrument(skip(self, task))]
    pub async fn create(&self, task: &Task) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, project_id, title, description, due_date, is_completed, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id)
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.is_completed)
        .bind(task.created_at)
        .execute(self.pool.pool())
        .await?;

        tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
        Ok(())
    }

    /// Find a task by id if the given user owns its project
    #[instrument(skip(self))]
    pub async fn find_by_id_for_user(
        &self,
        task_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.due_date,
                   t.is_completed, t.created_at
            FROM tasks t
            INNER JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(task)
    }

    /// List all tasks in a project, oldest first
    #[instrument(skip(self))]
    pub async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, description, due_date, is_completed, created_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(project_id)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(tasks)
    }

    /// Load a project's incomplete tasks ordered by ascending creation time.
    ///
    /// This is the scheduler's input contract: completed tasks are filtered
    /// out and the ordering is fixed before the engine ever sees the list.
    #[instrument(skip(self))]
    pub async fn find_incomplete_ordered(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Task>, DatabaseError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, description, due_date, is_completed, created_at
            FROM tasks
            WHERE project_id = $1 AND is_completed = FALSE
            ORDER BY created_at
            "#,
        )
        .bind(project_id)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(tasks)
    }

    /// Update a task's editable fields
    #[instrument(skip(self))]
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        task_id: Uuid,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        is_completed: bool,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks t
            SET title = $3,
                description = $4,
                due_date = $5,
                is_completed = $6
            FROM projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.user_id = $2
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(is_completed)
        .execute(self.pool.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Task not found: {}",
                task_id
            )));
        }

        tracing::info!(task_id = %task_id, "Task updated");
        Ok(())
    }

    /// Delete a task
    #[instrument(skip(self))]
    pub async fn delete(&self, task_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks t
            USING projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.user_id = $2
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .execute(self.pool.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Task not found: {}",
                task_id
            )));
        }

        tracing::info!(task_id = %task_id, "Task deleted");
        Ok(())
    }

    /// Persist scheduler due-date assignments in a single transaction.
    ///
    /// Either every assignment lands or none does, so a concurrent reader
    /// never observes a half-scheduled project.
    #[instrument(skip(self, assignments), fields(count = assignments.len()))]
    pub async fn persist_due_dates(
        &self,
        assignments: &[DueDateAssignment],
    ) -> Result<(), DatabaseError> {
        let mut tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        for assignment in assignments {
            sqlx::query("UPDATE tasks SET due_date = $2 WHERE id = $1")
                .bind(assignment.task_id)
                .bind(assignment.due_date)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(count = assignments.len(), "Due dates persisted");
        Ok(())
    }
}
