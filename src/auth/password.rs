// Password hashing helpers. bcrypt output embeds its own salt and cost.

use bcrypt::{hash, verify, DEFAULT_COST};

use super::error::AuthError;

/// Default bcrypt cost factor. Lower it (e.g. to [`bcrypt::MIN_COST`]) in
/// tests where hashing speed matters more than hardness.
pub const HASH_COST: u32 = DEFAULT_COST;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    hash(password, cost).map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    verify(password, password_hash).map_err(|e| AuthError::Hash(e.to_string()))
}
