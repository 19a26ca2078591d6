//! Core types and traits for the link tracker.
//!
//! This crate provides the [`Link`] entity together with the contracts the
//! rest of the workspace is built around: the storage [`Repository`], the
//! [`CredentialHasher`] and the [`LinkService`] domain service.

pub mod error;
pub mod hasher;
pub mod link;
pub mod repository;
pub mod service;

pub use error::{HashError, LinkError, StorageError};
pub use hasher::CredentialHasher;
pub use link::{Link, LinkId, PasswordDigest};
pub use repository::Repository;
pub use service::LinkService;
