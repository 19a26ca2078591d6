use crate::link::LinkId;
use thiserror::Error;

/// Errors returned by [`Repository`](crate::Repository) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("link {0} does not exist")]
    NotFound(LinkId),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors returned by [`CredentialHasher`](crate::CredentialHasher) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The candidate secret does not reproduce the stored digest.
    #[error("credentials do not match")]
    Mismatch,
    /// The hashing primitive itself failed.
    #[error("hashing failed: {0}")]
    Failure(String),
}

/// Errors returned by the [`LinkService`](crate::LinkService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("link not found")]
    NotFound(LinkId),
    #[error("link is inactive")]
    Inactive(LinkId),
    #[error("authentication failed")]
    Authentication,
    #[error("hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Storage(StorageError),
}

impl LinkError {
    /// Maps a repository error for `id`, turning a miss into the domain
    /// [`LinkError::NotFound`].
    pub fn from_storage(id: LinkId, error: StorageError) -> Self {
        match error {
            StorageError::NotFound(_) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}
