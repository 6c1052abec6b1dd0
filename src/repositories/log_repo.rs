use chrono::Utc;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, LogEntry, LogEntryWithExercise};

#[derive(Clone)]
pub struct LogRepository {
    pool: DbPool,
}

impl LogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a workout entry stamped with the current time.
    ///
    /// The exercise must belong to `user_id`; the ownership check and the
    /// insert are one statement, and a foreign or missing exercise fails
    /// with [`AppError::ForbiddenReference`].
    pub async fn create(
        &self,
        user_id: i64,
        exercise_id: i64,
        weight: i64,
        reps: i64,
        sets: i64,
        notes: &str,
    ) -> Result<LogEntry> {
        let pool = self.pool.clone();
        let notes = notes.to_string();
        let performed_at = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let inserted = conn.execute(
                "INSERT INTO logs (user_id, exercise_id, weight, reps, sets, notes, performed_at)
                 SELECT ?1, id, ?3, ?4, ?5, ?6, ?7 FROM exercises WHERE id = ?2 AND user_id = ?1",
                rusqlite::params![user_id, exercise_id, weight, reps, sets, notes, performed_at],
            )?;

            if inserted == 0 {
                return Err(AppError::ForbiddenReference);
            }

            Ok(LogEntry {
                id: conn.last_insert_rowid(),
                user_id,
                exercise_id,
                weight,
                reps,
                sets,
                notes,
                performed_at,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Entries owned by `user_id` with their exercise names, newest first.
    pub async fn find_by_user_with_exercise(
        &self,
        user_id: i64,
    ) -> Result<Vec<LogEntryWithExercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT l.id, l.exercise_id, e.name AS exercise_name, l.weight, l.reps, l.sets,
                        l.notes, l.performed_at
                 FROM logs l
                 JOIN exercises e ON l.exercise_id = e.id
                 WHERE l.user_id = ?
                 ORDER BY l.performed_at DESC, l.id DESC",
            )?;
            let entries = stmt
                .query_map([user_id], LogEntryWithExercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
