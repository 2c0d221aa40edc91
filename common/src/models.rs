use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Models
// ============================================================================

/// User represents an authenticated account that owns projects
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// UserClaims represents JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,      // Subject (user ID)
    pub username: String, // Username
    pub exp: i64,         // Expiration time (Unix timestamp)
    pub iat: i64,         // Issued at (Unix timestamp)
}

impl UserClaims {
    /// Parse the subject claim back into the owning user's id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

// ============================================================================
// Project Models
// ============================================================================

/// Project groups tasks under a single owning user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Task Models
// ============================================================================

/// Task is a unit of work inside a project. `due_date` is the only field the
/// scheduler ever writes; everything else is caller-owned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice@example.com"));
    }

    #[test]
    fn test_user_claims_round_trip_user_id() {
        let id = Uuid::new_v4();
        let claims = UserClaims {
            sub: id.to_string(),
            username: "alice".to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id().unwrap(), id);
    }

    #[test]
    fn test_task_deserialization_defaults() {
        let json = format!(
            r#"{{
                "id": "{}",
                "project_id": "{}",
                "title": "Write report",
                "description": null,
                "due_date": null,
                "is_completed": false,
                "created_at": "2026-01-05T09:00:00Z"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let task: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.title, "Write report");
        assert!(task.due_date.is_none());
        assert!(!task.is_completed);
    }
}
