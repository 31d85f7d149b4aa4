//! Argon2 password hashing.

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::errors::{AuthError, Result};

/// Hashes `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()).into())
}

/// Checks `candidate` against a stored PHC hash.
///
/// A mismatch is reported as `InvalidCredentials`; a malformed stored hash
/// is a hashing error.
pub fn verify_password(stored_hash: &str, candidate: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::Hashing(format!("Invalid stored password hash: {e}")))?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|err| match err {
            PasswordHashError::Password => AuthError::InvalidCredentials.into(),
            other => AuthError::Hashing(format!("Password verification failed: {other}")).into(),
        })
}
