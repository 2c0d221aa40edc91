// Project repository implementation
//
// Every query is scoped by the owning user's id so a caller can never read
// or mutate another user's projects.

use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::Project;
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;
use uuid::Uuid;

/// Project row joined with its task count, for list views
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectWithTaskCount {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub task_count: i64,
}

/// Repository for project-related database operations
#[derive(Clone)]
pub struct ProjectRepository {
    pool: DbPool,
}

impl ProjectRepository {
    /// Create a new ProjectRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new project
    #[instrument(skip(self, project))]
    pub async fn create(&self, project: &Project) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, title, description, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.user_id)
        .bind(project.created_at)
        .execute(self.pool.pool())
        .await?;

        tracing::info!(project_id = %project.id, user_id = %project.user_id, "Project created");
        Ok(())
    }

    /// List a user's projects, newest first, with task counts
    #[instrument(skip(self))]
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProjectWithTaskCount>, DatabaseError> {
        let projects = sqlx::query_as::<_, ProjectWithTaskCount>(
            r#"
            SELECT p.id, p.title, p.description, p.created_at,
                   COUNT(t.id) AS task_count
            FROM projects p
            LEFT JOIN tasks t ON t.project_id = p.id
            WHERE p.user_id = $1
            GROUP BY p.id, p.title, p.description, p.created_at
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(projects)
    }

    /// Find a project by id, but only if the given user owns it
    ///
    /// Returning `None` covers both "does not exist" and "not yours"; callers
    /// surface the two identically so project ids cannot be probed.
    #[instrument(skip(self))]
    pub async fn find_by_id_for_user(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, DatabaseError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, user_id, created_at
            FROM projects
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(project)
    }

    /// Update a project's title and description
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = $3,
                description = $4
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .execute(self.pool.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Project not found: {}",
                project_id
            )));
        }

        tracing::info!(project_id = %project_id, "Project updated");
        Ok(())
    }

    /// Delete a project and, through the cascade, its tasks
    #[instrument(skip(self))]
    pub async fn delete(&self, project_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(user_id)
            .execute(self.pool.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Project not found: {}",
                project_id
            )));
        }

        tracing::info!(project_id = %project_id, "Project deleted");
        Ok(())
    }
}
