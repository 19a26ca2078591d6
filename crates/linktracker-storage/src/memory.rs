use async_trait::async_trait;
use dashmap::DashMap;
use linktracker_core::repository::{Mutation, Repository, Result};
use linktracker_core::{Link, LinkId, StorageError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    links: DashMap<LinkId, Link>,
    next_id: AtomicU64,
}

/// In-memory implementation of the Repository trait using DashMap.
///
/// Identifiers are handed out sequentially starting at 1. Clones share the
/// same underlying storage, so several front-ends can work against one
/// repository. [`Repository::modify`] runs under the entry's shard write
/// guard, which serializes modifications of a link across all clones.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    inner: Arc<Inner>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                links: DashMap::with_capacity(capacity),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Number of links stored, active or not.
    pub fn len(&self) -> usize {
        self.inner.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.links.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save(&self, mut link: Link) -> Result<LinkId> {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        link.id = id;
        self.inner.links.insert(id, link);
        Ok(id)
    }

    async fn update(&self, link: &Link) -> Result<()> {
        // Holding the shard write guard makes the existence check and the
        // replacement a single step.
        let Some(mut stored) = self.inner.links.get_mut(&link.id) else {
            return Err(StorageError::NotFound(link.id));
        };
        *stored = link.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Link> {
        self.inner
            .links
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StorageError::NotFound(id))
    }

    async fn modify(&self, id: LinkId, mutation: Mutation) -> Result<Link> {
        let Some(mut stored) = self.inner.links.get_mut(&id) else {
            return Err(StorageError::NotFound(id));
        };
        mutation(stored.value_mut());
        Ok(stored.value().clone())
    }
}
