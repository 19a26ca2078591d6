use crate::link::{Link, LinkId};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::LinkError>;

/// Business rules of a [`Link`]: creation, authenticated redirects,
/// inspection and deactivation.
///
/// Callers are expected to validate their inputs (non-empty url and
/// password) before reaching the service.
#[async_trait]
pub trait LinkService: Send + Sync + 'static {
    /// Hashes `password` and stores a new active link pointing at `url`.
    async fn create(&self, url: &str, password: &str) -> Result<Link>;

    /// Authenticates against the link and counts one redirect.
    /// Returns the updated link.
    async fn redirect(&self, id: LinkId, password: &str) -> Result<Link>;

    /// Looks a link up without authenticating or mutating it.
    async fn find_by_id(&self, id: LinkId) -> Result<Link>;

    /// Marks the link inactive. There is no way back.
    async fn inactivate(&self, id: LinkId) -> Result<()>;
}
