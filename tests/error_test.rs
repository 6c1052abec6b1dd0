use axum::{http::StatusCode, response::IntoResponse};
use gymtrack::error::AppError;
use http_body_util::BodyExt;

async fn body_of(error: AppError) -> (StatusCode, String) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[test]
fn test_not_found_returns_404() {
    let response = AppError::NotFound("Page not found".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_unauthenticated_redirects_to_login() {
    let response = AppError::Unauthenticated.into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/login");
}

#[test]
fn test_invalid_credentials_returns_401() {
    let response = AppError::InvalidCredentials.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_duplicate_email_returns_409() {
    let response = AppError::DuplicateEmail.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_forbidden_reference_returns_403() {
    let response = AppError::ForbiddenReference.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_storage_error_is_generic_500() {
    let error = AppError::Database(rusqlite::Error::QueryReturnedNoRows);
    assert!(error.is_storage());

    let (status, body) = body_of(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Unexpected error");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let (status, body) = body_of(AppError::Internal("join error: boom".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Unexpected error");
}

#[test]
fn test_password_hash_returns_500() {
    let response = AppError::PasswordHash.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_non_storage_errors() {
    assert!(!AppError::InvalidCredentials.is_storage());
    assert!(!AppError::DuplicateEmail.is_storage());
    assert!(!AppError::Unauthenticated.is_storage());
}
