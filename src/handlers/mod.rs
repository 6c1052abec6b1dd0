pub mod auth;
pub mod dashboard;
pub mod exercises;
pub mod health;
pub mod logs;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
