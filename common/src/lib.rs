// Common library for shared code across the API and the task scheduler

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod telemetry;
