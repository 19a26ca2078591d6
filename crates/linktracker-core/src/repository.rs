use crate::error::StorageError;
use crate::link::{Link, LinkId};
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// An in-place change applied to a stored link by [`Repository::modify`].
pub type Mutation = Box<dyn FnOnce(&mut Link) + Send>;

/// Storage of [`Link`]s keyed by identifier.
///
/// Links are never removed: a deleted link is one marked inactive.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Stores a new link and returns its freshly assigned identifier.
    /// The `id` carried by `link` is ignored.
    async fn save(&self, link: Link) -> Result<LinkId>;

    /// Replaces the stored link with the same identifier.
    /// Returns `Err(NotFound)` if no such link exists.
    async fn update(&self, link: &Link) -> Result<()>;

    /// Retrieves the link for a given identifier.
    /// Returns `Err(NotFound)` if it does not exist.
    async fn find_by_id(&self, id: LinkId) -> Result<Link>;

    /// Applies `mutation` to the stored link and returns the result.
    ///
    /// The read, the change and the write happen as one step per key:
    /// concurrent modifications of the same link, through this handle or any
    /// other handle on the same store, never overwrite each other.
    /// Returns `Err(NotFound)` if no such link exists.
    async fn modify(&self, id: LinkId, mutation: Mutation) -> Result<Link>;
}
