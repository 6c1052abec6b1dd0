use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::CreateExercise;
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

#[derive(Template)]
#[template(path = "exercises/new.html")]
struct NewExerciseTemplate {
    user: AuthUser,
    error: Option<String>,
}

pub async fn new_page(auth_user: AuthUser) -> Result<Response> {
    let template = NewExerciseTemplate {
        user: auth_user,
        error: None,
    };

    Ok(Html(template.render()?).into_response())
}

pub async fn create(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Form(form): Form<CreateExercise>,
) -> Result<Response> {
    let name = form.name.trim();
    let category = form.category.trim();

    if name.is_empty() || category.is_empty() {
        let template = NewExerciseTemplate {
            user: auth_user,
            error: Some("Name and category are required".to_string()),
        };
        return Ok(Html(template.render()?).into_response());
    }

    let exercise = state
        .exercise_repo
        .create(auth_user.id, name, category)
        .await?;
    tracing::debug!(user_id = auth_user.id, exercise_id = exercise.id, "exercise added");

    Ok(Redirect::to("/").into_response())
}
