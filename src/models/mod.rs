pub mod exercise;
pub mod from_row;
pub mod log_entry;
pub mod user;

pub use exercise::{CreateExercise, Exercise};
pub use from_row::FromSqliteRow;
pub use log_entry::{CreateLogEntry, LogEntry, LogEntryWithExercise};
pub use user::{CreateUser, LoginCredentials, User};
