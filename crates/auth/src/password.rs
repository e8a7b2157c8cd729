//! Credential verification over bcrypt.
//!
//! bcrypt re-derives the full hash for every comparison, so verification
//! cost does not depend on where a wrong guess diverges from the stored
//! value. The plaintext is never logged and never stored.

use crate::error::AuthError;

/// Work factor for newly created hashes.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password for storage.
pub fn hash(plain: &str) -> Result<String, AuthError> {
    bcrypt::hash(plain, HASH_COST).map_err(AuthError::PasswordHash)
}

/// Check a submitted plaintext against a stored hash.
///
/// `Ok(false)` is a wrong password; `Err` means the stored hash itself is
/// unusable, which callers treat as an internal failure rather than a bad
/// guess.
pub fn verify(plain: &str, stored_hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plain, stored_hash).map_err(AuthError::PasswordHash)
}
