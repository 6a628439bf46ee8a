//! Password hashing and verification using Argon2.
//!
//! Hashing is self-salting: two hashes of the same password are different
//! strings, and both verify. Verification never errors, it only answers
//! whether the password matches.

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Hashes a password with a freshly generated salt.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(plain.as_bytes(), &salt)?.to_string())
}

/// Checks a password against a stored digest.
///
/// Returns false on a mismatch and on a digest that does not parse; the
/// caller cannot tell the two apart.
pub fn verify_password(plain: &str, digest: &str) -> bool {
    let Ok(digest) = PasswordHashString::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &digest.password_hash())
        .is_ok()
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
