pub mod auth;

pub use auth::{AuthGate, AuthUser, OptionalAuthUser};
