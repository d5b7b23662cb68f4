//! Password hashing.
//!
//! New hashes are Argon2id PHC strings. Accounts created by the earlier
//! Python app store an unsalted hex SHA-256 digest, which still verifies
//! and should be replaced on the next successful login.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sha2::{Digest, Sha256};

/// Outcome of checking a password against a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Valid,
    /// Correct password, but the stored hash is the legacy format
    ValidLegacy,
    Invalid,
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored: &str) -> Verification {
    if is_legacy_hash(stored) {
        let digest = hex::encode(Sha256::digest(password.as_bytes()));
        return if digest.eq_ignore_ascii_case(stored) {
            Verification::ValidLegacy
        } else {
            Verification::Invalid
        };
    }

    let parsed = match PasswordHash::new(stored) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!("Unreadable password hash: {}", e);
            return Verification::Invalid;
        }
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Verification::Valid,
        Err(_) => Verification::Invalid,
    }
}

fn is_legacy_hash(stored: &str) -> bool {
    stored.len() == 64 && stored.chars().all(|c| c.is_ascii_hexdigit())
}
