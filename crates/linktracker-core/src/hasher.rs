use crate::error::HashError;
use crate::link::PasswordDigest;

/// One-way transform of a plaintext secret into a verifiable digest.
///
/// Implementations must be stateless so they can be shared between
/// concurrent requests.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produces a salted digest of `secret`.
    fn hash(&self, secret: &str) -> Result<PasswordDigest, HashError>;

    /// Checks `candidate` against `digest`.
    ///
    /// Returns `Err(HashError::Mismatch)` when the candidate is wrong and
    /// `Err(HashError::Failure)` when the primitive could not run at all.
    fn verify(&self, digest: &PasswordDigest, candidate: &str) -> Result<(), HashError>;
}
