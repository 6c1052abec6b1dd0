//! Argon2id password hashing.
//!
//! Parameters target roughly 50-150ms per verification. Both functions are
//! CPU bound and must be called from a blocking task.

use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::OsRng;

use crate::error::{AppError, Result};

const ARGON2_M_COST: u32 = 19456; // 19 MiB
const ARGON2_T_COST: u32 = 2;
const ARGON2_P_COST: u32 = 1;

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, None)
        .map_err(|_| AppError::PasswordHash)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?
        .to_string();
    Ok(password_hash)
}

/// Returns `Ok(false)` on mismatch; a hash that cannot be parsed is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::PasswordHash)?;
    Ok(hasher()?
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Stands in for the stored hash when no account matches, so an unknown email
/// costs the same Argon2 verification as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("gymtrack-no-such-account").ok());

/// Verify `password` against the dummy hash. Never matches an account.
pub fn verify_dummy(password: &str) -> Result<bool> {
    let hash = DUMMY_HASH.as_deref().ok_or(AppError::PasswordHash)?;
    verify_password(password, hash)
}
