//! Link service implementation.
//!
//! This crate provides [`LinkTracker`], the implementation of the
//! [`LinkService`](linktracker_core::LinkService) contract, and the bcrypt
//! backed [`BcryptHasher`]. Core types are re-exported from `linktracker_core`.

pub mod hasher;
pub mod service;

pub use hasher::BcryptHasher;
pub use linktracker_core::{Link, LinkError, LinkId, LinkService};
pub use service::LinkTracker;
