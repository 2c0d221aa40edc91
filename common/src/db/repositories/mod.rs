// Repository layer for database operations

pub mod project;
pub mod task;
pub mod user;

pub use project::{ProjectRepository, ProjectWithTaskCount};
pub use task::{DueDateAssignment, TaskRepository};
pub use user::UserRepository;
