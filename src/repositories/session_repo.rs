use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::session::SESSION_TTL_DAYS;

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new session for a user. Returns the session token.
    pub async fn create(&self, user_id: i64) -> Result<String> {
        let pool = self.pool.clone();
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(SESSION_TTL_DAYS);

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![token, user_id, now, expires_at],
            )?;
            Ok(token)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Find a valid (non-expired) session and return its user id.
    /// Lazily deletes the session if it has expired.
    pub async fn find_valid(&self, token: &str) -> Result<Option<i64>> {
        let pool = self.pool.clone();
        let token = token.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let result: Option<(i64, chrono::DateTime<Utc>)> = conn
                .query_row(
                    "SELECT user_id, expires_at FROM sessions WHERE token = ?",
                    [&token],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match result {
                Some((_, expires_at)) if expires_at <= now => {
                    conn.execute("DELETE FROM sessions WHERE token = ?", [&token])?;
                    Ok(None)
                }
                Some((user_id, _)) => Ok(Some(user_id)),
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a single session (logout).
    pub async fn delete(&self, token: &str) -> Result<()> {
        let pool = self.pool.clone();
        let token = token.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute("DELETE FROM sessions WHERE token = ?", [&token])?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Batch delete all expired sessions. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let pool = self.pool.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let removed = conn.execute(
                "DELETE FROM sessions WHERE expires_at <= ?",
                rusqlite::params![now],
            )?;
            Ok(removed)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn create_test_user(pool: &DbPool) -> i64 {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES ('a@x.com', 'hash', datetime('now'))",
            [],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn expire(pool: &DbPool, token: &str) {
        let conn = pool.get().unwrap();
        let past = Utc::now() - chrono::Duration::hours(1);
        conn.execute(
            "UPDATE sessions SET expires_at = ? WHERE token = ?",
            rusqlite::params![past, token],
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_find_valid() {
        let pool = setup_test_db();
        let user_id = create_test_user(&pool);
        let repo = SessionRepository::new(pool);

        let token = repo.create(user_id).await.unwrap();

        assert_eq!(repo.find_valid(&token).await.unwrap(), Some(user_id));
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let pool = setup_test_db();
        let user_id = create_test_user(&pool);
        let repo = SessionRepository::new(pool);

        let first = repo.create(user_id).await.unwrap();
        let second = repo.create(user_id).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let repo = SessionRepository::new(setup_test_db());
        assert_eq!(repo.find_valid("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_invalidates() {
        let pool = setup_test_db();
        let user_id = create_test_user(&pool);
        let repo = SessionRepository::new(pool);

        let token = repo.create(user_id).await.unwrap();
        repo.delete(&token).await.unwrap();

        assert_eq!(repo.find_valid(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_session_is_removed_on_lookup() {
        let pool = setup_test_db();
        let user_id = create_test_user(&pool);
        let repo = SessionRepository::new(pool.clone());

        let token = repo.create(user_id).await.unwrap();
        expire(&pool, &token);

        assert_eq!(repo.find_valid(&token).await.unwrap(), None);

        let conn = pool.get().unwrap();
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_cleanup_expired_keeps_live_sessions() {
        let pool = setup_test_db();
        let user_id = create_test_user(&pool);
        let repo = SessionRepository::new(pool.clone());

        let live = repo.create(user_id).await.unwrap();
        let stale = repo.create(user_id).await.unwrap();
        expire(&pool, &stale);

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.find_valid(&live).await.unwrap(), Some(user_id));
    }
}
