pub mod exercise_repo;
pub mod log_repo;
pub mod session_repo;
pub mod user_repo;

pub use exercise_repo::ExerciseRepository;
pub use log_repo::LogRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;
