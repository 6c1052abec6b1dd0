use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::LogEntryWithExercise;
use crate::repositories::LogRepository;

#[derive(Clone)]
pub struct DashboardState {
    pub log_repo: LogRepository,
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    user: AuthUser,
    logs: Vec<LogEntryWithExercise>,
}

pub async fn index(State(state): State<DashboardState>, auth_user: AuthUser) -> Result<Response> {
    // A failed read shows an empty history rather than an error page
    let logs = state
        .log_repo
        .find_by_user_with_exercise(auth_user.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(user_id = auth_user.id, "Failed to load workout logs: {}", e);
            Vec::new()
        });

    let template = DashboardTemplate {
        user: auth_user,
        logs,
    };

    Ok(Html(template.render()?).into_response())
}
