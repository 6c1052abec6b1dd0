#![allow(dead_code)]

use axum::{
    body::Body,
    response::{IntoResponse, Response},
    Router,
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use http::{header, Request};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gymtrack::db::{create_memory_pool, DbPool};
use gymtrack::handlers::{dashboard, exercises, logs};
use gymtrack::middleware::AuthGate;
use gymtrack::migrations::run_migrations_for_tests;
use gymtrack::models::{Exercise, LogEntry, User};
use gymtrack::repositories::{
    ExerciseRepository, LogRepository, SessionRepository, UserRepository,
};
use gymtrack::session::{create_session_cookie, SessionKeys};

pub const SESSION_SECRET: &str = "integration-test-session-secret-0123456789";

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub struct TestApp {
    pub router: Router,
    pub session_repo: SessionRepository,
    pub keys: SessionKeys,
}

pub fn create_test_app(pool: DbPool) -> Router {
    create_test_app_with_session(pool).router
}

pub fn create_test_app_with_session(pool: DbPool) -> TestApp {
    let keys = SessionKeys::from_secrets(SESSION_SECRET, &[]).unwrap();
    create_test_app_with_keys(pool, keys)
}

pub fn create_test_app_with_keys(pool: DbPool, keys: SessionKeys) -> TestApp {
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let log_repo = LogRepository::new(pool.clone());

    let gate = AuthGate::new(user_repo, session_repo.clone(), keys.clone());
    let dashboard_state = dashboard::DashboardState {
        log_repo: log_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let logs_state = logs::LogsState {
        log_repo,
        exercise_repo,
    };

    let router = gymtrack::routes::create_router(
        gate,
        dashboard_state,
        exercises_state,
        logs_state,
        pool,
    );

    TestApp {
        router,
        session_repo,
        keys,
    }
}

pub async fn create_test_user(pool: &DbPool, email: &str, password: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo.create(email, password).await.unwrap()
}

/// Open a session for `user` and return a `Cookie` header value signed with `key`.
pub async fn session_cookie_signed_with(test_app: &TestApp, user: &User, key: &Key) -> String {
    let token = test_app.session_repo.create(user.id).await.unwrap();
    cookie_header_for_token(&token, key)
}

/// `Cookie` header value carrying `token`, signed with `key`.
pub fn cookie_header_for_token(token: &str, key: &Key) -> String {
    let response = SignedCookieJar::new(key.clone())
        .add(create_session_cookie(token))
        .into_response();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    extract_cookie_header(set_cookie)
}

/// Drop tables out from under a running app so later reads and writes fail.
pub fn drop_tables(pool: &DbPool, tables: &[&str]) {
    let conn = pool.get().unwrap();
    for table in tables {
        conn.execute_batch(&format!("DROP TABLE {table};")).unwrap();
    }
}

pub async fn create_session_cookie_header(test_app: &TestApp, user: &User) -> String {
    let key = test_app.keys.current().clone();
    session_cookie_signed_with(test_app, user, &key).await
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Extract just the cookie name=value part for use in Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

pub fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}

pub async fn body_string(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(router: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

// Test data creation helpers
pub async fn create_test_exercise(
    pool: &DbPool,
    user_id: i64,
    name: &str,
    category: &str,
) -> Exercise {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    exercise_repo.create(user_id, name, category).await.unwrap()
}

pub async fn create_test_log(
    pool: &DbPool,
    user_id: i64,
    exercise_id: i64,
    weight: i64,
    reps: i64,
    sets: i64,
    notes: &str,
) -> LogEntry {
    let log_repo = LogRepository::new(pool.clone());
    log_repo
        .create(user_id, exercise_id, weight, reps, sets, notes)
        .await
        .unwrap()
}
