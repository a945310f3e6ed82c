//! Password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use soleverse_core::PasswordDigest;

/// Errors that can occur while producing a digest.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Turns passwords into stored digests and checks passwords against them.
pub trait CredentialVerifier: Send + Sync {
    /// Hash a password for storage.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::PasswordHash` if hashing fails.
    fn digest(&self, password: &str) -> Result<PasswordDigest, CredentialError>;

    /// Whether `password` matches `digest`. A malformed digest never matches.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

/// Argon2id with a random salt per password.
#[derive(Debug, Clone, Default)]
pub struct Argon2Verifier {
    params: Option<Params>,
}

impl Argon2Verifier {
    /// Verifier using the crate's default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifier with explicit cost parameters.
    #[must_use]
    pub const fn with_params(params: Params) -> Self {
        Self {
            params: Some(params),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        self.params.clone().map_or_else(Argon2::default, |params| {
            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        })
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn digest(&self, password: &str) -> Result<PasswordDigest, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|_| CredentialError::PasswordHash)
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(digest.as_str()) else {
            return false;
        };

        // Parameters are read from the digest itself.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
