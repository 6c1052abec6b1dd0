use axum::{
    routing::get,
    Extension, Router,
};

use crate::db::DbPool;
use crate::handlers::{self, auth, dashboard, exercises, health, logs};
use crate::middleware::AuthGate;

pub fn create_router(
    gate: AuthGate,
    dashboard_state: dashboard::DashboardState,
    exercises_state: exercises::ExercisesState,
    logs_state: logs::LogsState,
    pool: DbPool,
) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        .with_state(dashboard_state)
        // Auth routes
        .route(
            "/register",
            get(auth::register_page).post(auth::register_submit),
        )
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .with_state(gate.clone())
        // Exercise routes
        .route(
            "/exercise/add",
            get(exercises::new_page).post(exercises::create),
        )
        .with_state(exercises_state)
        // Log routes
        .route("/log", get(logs::new_page).post(logs::create))
        .with_state(logs_state)
        .route("/health", get(health::health_check))
        .with_state(pool)
        .fallback(handlers::not_found)
        // Session resolution for the AuthUser extractor
        .layer(Extension(gate))
}
