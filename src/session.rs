use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use thiserror::Error;

pub const SESSION_COOKIE_NAME: &str = "session";
pub const SESSION_TTL_DAYS: i64 = 7;

/// Shortest secret accepted for key derivation.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Error, Debug)]
pub enum SessionKeyError {
    #[error("session secret must be at least 32 bytes")]
    TooShort,
}

/// Cookie signing keys.
///
/// New cookies are always signed with `current`. Cookies signed with any of
/// the `previous` keys are still accepted until those secrets are dropped from
/// configuration, which lets a secret be rotated without logging everyone out.
#[derive(Clone)]
pub struct SessionKeys {
    current: Key,
    previous: Vec<Key>,
}

impl SessionKeys {
    pub fn new(current: Key, previous: Vec<Key>) -> Self {
        Self { current, previous }
    }

    pub fn generate() -> Self {
        Self::new(Key::generate(), Vec::new())
    }

    pub fn from_secrets(current: &str, previous: &[String]) -> Result<Self, SessionKeyError> {
        let current = derive_key(current)?;
        let previous = previous
            .iter()
            .map(|secret| derive_key(secret))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(current, previous))
    }

    pub fn current(&self) -> &Key {
        &self.current
    }

    /// Jar for writing cookies; always signs with the current key.
    pub fn jar(&self, headers: &HeaderMap) -> SignedCookieJar {
        SignedCookieJar::from_headers(headers, self.current.clone())
    }

    /// The verified session token carried by the request, if any.
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        std::iter::once(&self.current)
            .chain(self.previous.iter())
            .find_map(|key| {
                SignedCookieJar::from_headers(headers, key.clone())
                    .get(SESSION_COOKIE_NAME)
                    .map(|cookie| cookie.value().to_string())
            })
    }
}

fn derive_key(secret: &str) -> Result<Key, SessionKeyError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(SessionKeyError::TooShort);
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

pub fn create_session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// An already-expired cookie that overwrites the session cookie.
pub fn remove_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
