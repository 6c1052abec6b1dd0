use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: i64,
    pub exercise_id: i64,
    pub weight: i64,
    pub reps: i64,
    pub sets: i64,
    pub notes: String,
    pub performed_at: DateTime<Utc>,
}

impl FromSqliteRow for LogEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            exercise_id: row.get("exercise_id")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
            sets: row.get("sets")?,
            notes: row.get("notes")?,
            performed_at: row.get("performed_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateLogEntry {
    pub exercise_id: i64,
    pub weight: i64,
    pub reps: i64,
    pub sets: i64,
    #[serde(default)]
    pub notes: String,
}

/// A log entry joined with the name of its exercise, as listed on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntryWithExercise {
    pub id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub weight: i64,
    pub reps: i64,
    pub sets: i64,
    pub notes: String,
    pub performed_at: DateTime<Utc>,
}

impl FromSqliteRow for LogEntryWithExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            exercise_id: row.get("exercise_id")?,
            exercise_name: row.get("exercise_name")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
            sets: row.get("sets")?,
            notes: row.get("notes")?,
            performed_at: row.get("performed_at")?,
        })
    }
}
