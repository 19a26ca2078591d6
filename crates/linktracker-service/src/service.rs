use async_trait::async_trait;
use linktracker_core::{
    CredentialHasher, HashError, Link, LinkError, LinkId, LinkService, PasswordDigest, Repository,
};
use linktracker_core::repository::Mutation;
use std::sync::Arc;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, LinkError>;

/// A concrete implementation of the `LinkService` trait.
///
/// This service wraps a `Repository` and a `CredentialHasher` to handle:
/// - Password hashing on creation
/// - Password verification and redirect counting
/// - Deactivation
///
/// Counter and status changes go through [`Repository::modify`], so they are
/// atomic per link even when several trackers share one repository. The
/// password check runs before that step, against the digest, which never
/// changes after creation.
#[derive(Debug, Clone)]
pub struct LinkTracker<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: Repository, H: CredentialHasher> LinkTracker<R, H> {
    pub fn new(repository: R, hasher: H) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
        }
    }

    async fn load(&self, id: LinkId) -> Result<Link> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| LinkError::from_storage(id, e))
    }

    async fn modify(&self, id: LinkId, mutation: Mutation) -> Result<Link> {
        self.repository
            .modify(id, mutation)
            .await
            .map_err(|e| LinkError::from_storage(id, e))
    }

    // bcrypt is CPU bound, keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<PasswordDigest> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| LinkError::Hashing(e.to_string()))?
            .map_err(hash_to_link_error)
    }

    async fn verify_password(&self, digest: PasswordDigest, password: &str) -> Result<()> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| LinkError::Hashing(e.to_string()))?
            .map_err(hash_to_link_error)
    }
}

#[async_trait]
impl<R: Repository, H: CredentialHasher> LinkService for LinkTracker<R, H> {
    async fn create(&self, url: &str, password: &str) -> Result<Link> {
        let password_hash = self.hash_password(password).await?;

        let mut link = Link::new(url, password_hash);
        link.id = self
            .repository
            .save(link.clone())
            .await
            .map_err(LinkError::Storage)?;

        debug!(link_id = link.id, url = %link.url, "created link");
        Ok(link)
    }

    async fn redirect(&self, id: LinkId, password: &str) -> Result<Link> {
        let link = self.load(id).await?;
        self.verify_password(link.password_hash, password)
            .await
            .inspect_err(|e| trace!(link_id = id, error = %e, "redirect rejected"))?;

        // Only count while active; an inactive link stays untouched.
        let link = self
            .modify(
                id,
                Box::new(|link: &mut Link| {
                    if !link.inactive {
                        link.redirect_count += 1;
                    }
                }),
            )
            .await?;

        // Only authenticated callers learn that the link was deactivated.
        if link.inactive {
            debug!(link_id = id, "refusing redirect through inactive link");
            return Err(LinkError::Inactive(id));
        }

        debug!(link_id = id, url = %link.url, count = link.redirect_count, "redirecting");
        Ok(link)
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Link> {
        trace!(link_id = id, "looking up link");
        self.load(id).await
    }

    async fn inactivate(&self, id: LinkId) -> Result<()> {
        self.modify(id, Box::new(|link: &mut Link| link.inactive = true)).await?;

        debug!(link_id = id, "inactivated link");
        Ok(())
    }
}

/// Converts a HashError to a LinkError.
fn hash_to_link_error(e: HashError) -> LinkError {
    match e {
        HashError::Mismatch => LinkError::Authentication,
        HashError::Failure(message) => LinkError::Hashing(message),
    }
}
