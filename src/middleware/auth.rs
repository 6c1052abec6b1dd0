use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::error::AppError;
use crate::models::User;
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::{create_session_cookie, remove_session_cookie, SessionKeys};

/// Resolves and manages session identity. Installed on the router as an
/// `Extension` so the [`AuthUser`] extractor works under any handler state.
#[derive(Clone)]
pub struct AuthGate {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
    pub keys: SessionKeys,
}

impl AuthGate {
    pub fn new(
        user_repo: UserRepository,
        session_repo: SessionRepository,
        keys: SessionKeys,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            keys,
        }
    }

    /// The user behind the request's session cookie, if it is signed, maps to
    /// a live session, and that session's user still exists.
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Option<AuthUser>, AppError> {
        let Some(token) = self.keys.session_token(headers) else {
            return Ok(None);
        };
        let Some(user_id) = self.session_repo.find_valid(&token).await? else {
            return Ok(None);
        };
        Ok(self.user_repo.find_by_id(user_id).await?.map(AuthUser::from))
    }

    /// Open a session for `user` and return the jar carrying its cookie. A
    /// session the request already carried is ended first.
    pub async fn login(
        &self,
        headers: &HeaderMap,
        user: &User,
    ) -> Result<SignedCookieJar, AppError> {
        if let Some(previous) = self.keys.session_token(headers) {
            self.session_repo.delete(&previous).await?;
        }
        let token = self.session_repo.create(user.id).await?;
        tracing::info!(user_id = user.id, "session started");
        Ok(self.keys.jar(headers).add(create_session_cookie(&token)))
    }

    /// Drop the request's session (if any) and clear the cookie.
    pub async fn logout(&self, headers: &HeaderMap) -> Result<SignedCookieJar, AppError> {
        if let Some(token) = self.keys.session_token(headers) {
            self.session_repo.delete(&token).await?;
        }
        Ok(self.keys.jar(headers).add(remove_session_cookie()))
    }
}

#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

fn gate(parts: &Parts) -> Result<AuthGate, AppError> {
    parts
        .extensions
        .get::<AuthGate>()
        .cloned()
        .ok_or_else(|| AppError::Internal("AuthGate extension missing".to_string()))
}

/// Rejects with [`AppError::Unauthenticated`], which redirects to `/login`.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let gate = gate(parts)?;
        gate.resolve(&parts.headers)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}

// Optional auth - doesn't redirect, just returns None if not logged in.
// A failed session lookup also counts as logged out.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let gate = gate(parts)?;
        let user = gate.resolve(&parts.headers).await.unwrap_or_else(|e| {
            tracing::warn!("Session lookup failed, treating as anonymous: {}", e);
            None
        });
        Ok(OptionalAuthUser(user))
    }
}
