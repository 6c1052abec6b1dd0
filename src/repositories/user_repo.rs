use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, User};
use crate::password::{hash_password, verify_dummy, verify_password};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?")?;
            let result = stmt.query_row([id], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let email = email.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE email = ?")?;
            let result = stmt.query_row([&email], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Hash the password and insert the user.
    ///
    /// Fails with [`AppError::DuplicateEmail`] when the email is taken.
    pub async fn create(&self, email: &str, password: &str) -> Result<User> {
        let pool = self.pool.clone();
        let email = email.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let password_hash = hash_password(&password)?;
            let created_at = Utc::now();

            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?)",
                rusqlite::params![email, password_hash, created_at],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateEmail
                } else {
                    AppError::Database(e)
                }
            })?;

            Ok(User {
                id: conn.last_insert_rowid(),
                email,
                password_hash,
                created_at,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Check a login attempt. Unknown email and wrong password both yield
    /// [`AppError::InvalidCredentials`], and both pay for one Argon2
    /// verification.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self.find_by_email(email).await?;

        let password = password.to_string();
        let hash = user.as_ref().map(|u| u.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || match hash {
            Some(hash) => verify_password(&password, &hash),
            None => verify_dummy(&password).map(|_| false),
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        match user {
            Some(user) if matches => Ok(user),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
