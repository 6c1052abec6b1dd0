use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::DbPool;
use crate::version::GIT_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    git_version: &'static str,
}

/// Liveness plus a `SELECT 1` round trip through the pool. Answers 503 when
/// the database can't be reached.
pub async fn health_check(State(pool): State<DbPool>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = tokio::task::spawn_blocking(move || {
        let conn = pool.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok::<_, crate::error::AppError>(())
    })
    .await;

    let (status, database) = match reachable {
        Ok(Ok(())) => (StatusCode::OK, "ok"),
        Ok(Err(e)) => {
            tracing::error!("Health check could not reach the database: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
        Err(e) => {
            tracing::error!("Health check task failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status.is_success() { "ok" } else { "degraded" },
            database,
            git_version: GIT_VERSION,
        }),
    )
}
