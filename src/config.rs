use std::env;

use crate::session::{SessionKeyError, SessionKeys};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_secret: Option<String>,
    pub previous_session_secrets: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:gymtrack.db?mode=rwc".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            session_secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            previous_session_secrets: env::var("SESSION_SECRET_PREVIOUS")
                .map(|v| parse_secret_list(&v))
                .unwrap_or_default(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the cookie signing keys.
    ///
    /// Without `SESSION_SECRET` a random key is used, so every restart
    /// invalidates all outstanding cookies.
    pub fn session_keys(&self) -> Result<SessionKeys, SessionKeyError> {
        match &self.session_secret {
            Some(secret) => SessionKeys::from_secrets(secret, &self.previous_session_secrets),
            None => {
                tracing::warn!(
                    "SESSION_SECRET is not set; using a random key, sessions will not survive a restart"
                );
                Ok(SessionKeys::generate())
            }
        }
    }
}

fn parse_secret_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
