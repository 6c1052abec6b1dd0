use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::error::{AppError, Result};
use crate::middleware::{AuthGate, AuthUser, OptionalAuthUser};
use crate::models::{CreateUser, LoginCredentials};

// Templates
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterTemplate {
    error: Option<String>,
}

fn login_form(error: Option<&str>) -> Result<Response> {
    let template = LoginTemplate {
        error: error.map(str::to_string),
    };
    Ok(Html(template.render()?).into_response())
}

fn register_form(error: Option<&str>) -> Result<Response> {
    let template = RegisterTemplate {
        error: error.map(str::to_string),
    };
    Ok(Html(template.render()?).into_response())
}

// Handlers
pub async fn login_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    // Redirect to dashboard if already logged in
    if auth_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    login_form(None)
}

pub async fn login_submit(
    State(gate): State<AuthGate>,
    headers: HeaderMap,
    Form(credentials): Form<LoginCredentials>,
) -> Result<Response> {
    let email = credentials.email.trim();

    match gate.user_repo.authenticate(email, &credentials.password).await {
        Ok(user) => {
            let jar = gate.login(&headers, &user).await?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            tracing::info!(email, "failed login attempt");
            login_form(Some("Invalid email or password"))
        }
        Err(e) => Err(e),
    }
}

pub async fn register_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    if auth_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    register_form(None)
}

pub async fn register_submit(
    State(gate): State<AuthGate>,
    headers: HeaderMap,
    Form(form): Form<CreateUser>,
) -> Result<Response> {
    let email = form.email.trim();

    if email.is_empty() || form.password.is_empty() {
        return register_form(Some("Email and password are required"));
    }

    match gate.user_repo.create(email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "registered new user");

            // Auto login
            let jar = gate.login(&headers, &user).await?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::DuplicateEmail) => {
            register_form(Some("An account with that email already exists"))
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(
    State(gate): State<AuthGate>,
    auth_user: AuthUser,
    headers: HeaderMap,
) -> Result<Response> {
    let jar = gate.logout(&headers).await?;
    tracing::info!(user_id = auth_user.id, "logged out");
    Ok((jar, Redirect::to("/login")).into_response())
}
