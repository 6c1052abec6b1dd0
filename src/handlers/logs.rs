use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateLogEntry, Exercise};
use crate::repositories::{ExerciseRepository, LogRepository};

#[derive(Clone)]
pub struct LogsState {
    pub log_repo: LogRepository,
    pub exercise_repo: ExerciseRepository,
}

#[derive(Template)]
#[template(path = "logs/new.html")]
struct NewLogTemplate {
    user: AuthUser,
    exercises: Vec<Exercise>,
    error: Option<String>,
}

impl LogsState {
    /// The user's exercises for the form's picker; empty if the read fails.
    async fn exercises_for(&self, user_id: i64) -> Vec<Exercise> {
        self.exercise_repo
            .find_by_user(user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(user_id, "Failed to load exercises: {}", e);
                Vec::new()
            })
    }
}

pub async fn new_page(State(state): State<LogsState>, auth_user: AuthUser) -> Result<Response> {
    let exercises = state.exercises_for(auth_user.id).await;

    let template = NewLogTemplate {
        user: auth_user,
        exercises,
        error: None,
    };

    Ok(Html(template.render()?).into_response())
}

pub async fn create(
    State(state): State<LogsState>,
    auth_user: AuthUser,
    Form(form): Form<CreateLogEntry>,
) -> Result<Response> {
    let result = state
        .log_repo
        .create(
            auth_user.id,
            form.exercise_id,
            form.weight,
            form.reps,
            form.sets,
            &form.notes,
        )
        .await;

    match result {
        Ok(entry) => {
            tracing::debug!(user_id = auth_user.id, log_id = entry.id, "workout logged");
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::ForbiddenReference) => {
            tracing::warn!(
                user_id = auth_user.id,
                exercise_id = form.exercise_id,
                "log entry referenced an exercise the user does not own"
            );
            let exercises = state.exercises_for(auth_user.id).await;
            let template = NewLogTemplate {
                user: auth_user,
                exercises,
                error: Some("Choose one of your own exercises".to_string()),
            };
            Ok((StatusCode::FORBIDDEN, Html(template.render()?)).into_response())
        }
        Err(e) => Err(e),
    }
}
