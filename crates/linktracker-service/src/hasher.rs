//! Password hashing and verification.
//!
//! Centralizes bcrypt handling for link passwords.

use linktracker_core::{CredentialHasher, HashError, PasswordDigest};

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Bcrypt based [`CredentialHasher`].
///
/// Every digest carries its own random salt and cost factor, so the hasher
/// itself holds nothing but the cost used for new digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Creates a hasher using bcrypt's default cost.
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Creates a hasher with a custom cost factor, in `4..=31`.
    pub fn with_cost(cost: u32) -> Result<Self, HashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashError::Failure(format!(
                "cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, secret: &str) -> Result<PasswordDigest, HashError> {
        bcrypt::hash(secret, self.cost)
            .map(PasswordDigest::new)
            .map_err(|e| HashError::Failure(e.to_string()))
    }

    fn verify(&self, digest: &PasswordDigest, candidate: &str) -> Result<(), HashError> {
        match bcrypt::verify(candidate, digest.as_str()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(HashError::Mismatch),
            Err(e) => Err(HashError::Failure(e.to_string())),
        }
    }
}
