use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Exercise, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Exercises owned by `user_id`, in the order they were added.
    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE user_id = ? ORDER BY id")?;
            let exercises = stmt
                .query_map([user_id], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, user_id: i64, name: &str, category: &str) -> Result<Exercise> {
        let pool = self.pool.clone();
        let name = name.to_string();
        let category = category.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (user_id, name, category) VALUES (?, ?, ?)",
                rusqlite::params![user_id, name, category],
            )?;
            Ok(Exercise {
                id: conn.last_insert_rowid(),
                user_id,
                name,
                category,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
