use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, health, metrics, projects, scheduler, tasks};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Assemble the application router: an open surface for health, metrics and
/// authentication, and a token-guarded surface for everything else.
pub fn create_router(state: AppState) -> Router {
    let open = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let guarded = Router::new()
        .route(
            "/api/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/projects/:id/tasks", post(tasks::create_task))
        .route(
            "/api/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/api/projects/:id/scheduler/schedule",
            post(scheduler::schedule_tasks),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    open.merge(guarded)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
