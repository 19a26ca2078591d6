pub mod memory;

pub use linktracker_core::repository::{Mutation, Repository, Result};
pub use linktracker_core::StorageError;
pub use memory::InMemoryRepository;
