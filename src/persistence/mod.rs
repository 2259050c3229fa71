//! Persistence layer: the business store seam and its two backings.
//!
//! Provides the [`BusinessStore`] trait for CRUD access to listing
//! records. [`postgres::PostgresBusinessStore`] implements it over a
//! `sqlx::PgPool`; [`memory::MemoryBusinessStore`] is the resident
//! substitute dataset the service facade fails over to.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::business::{Business, BusinessDraft, BusinessUpdate};
use crate::domain::business_id::BusinessId;
use crate::domain::listing::{BusinessListing, ListOptions};

pub mod memory;
pub mod postgres;

pub use memory::MemoryBusinessStore;
pub use postgres::PostgresBusinessStore;

/// The one failure kind the service facade acts on: a primary-store
/// operation did not complete.
///
/// The cause is carried as text for logging only. No finer distinction
/// (timeout, auth, constraint violation) changes control flow; any
/// [`StoreError`] trips the same failover.
#[derive(Debug, Clone, Error)]
#[error("primary store operation failed: {0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self(err.to_string())
    }
}

/// Async CRUD surface over a backing store of business listings.
///
/// Implementations must be shareable across request handlers. All lookup
/// style operations distinguish "not found" (`Ok(None)`) from a store
/// failure (`Err`).
#[async_trait]
pub trait BusinessStore: Send + Sync + std::fmt::Debug {
    /// Cheap connectivity check, `SELECT 1` or equivalent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store is unreachable.
    async fn probe(&self) -> Result<(), StoreError>;

    /// Creates a listing from a draft and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn create(&self, draft: BusinessDraft) -> Result<Business, StoreError>;

    /// Fetches a listing by id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn get_by_id(&self, id: &BusinessId) -> Result<Option<Business>, StoreError>;

    /// Fetches a listing by contact email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn get_by_email(&self, email: &str) -> Result<Option<Business>, StoreError>;

    /// Fetches the listing owned by the given identity-provider account.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn get_by_owner(&self, owner_id: &str) -> Result<Option<Business>, StoreError>;

    /// Applies a partial patch, returning the updated record or `None`
    /// when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn update(
        &self,
        id: &BusinessId,
        patch: &BusinessUpdate,
    ) -> Result<Option<Business>, StoreError>;

    /// Deletes a listing, returning the removed record or `None` when the
    /// id does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn delete(&self, id: &BusinessId) -> Result<Option<Business>, StoreError>;

    /// Queries the directory, paginated or capped per the options.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store operation fails.
    async fn list(&self, options: &ListOptions) -> Result<BusinessListing, StoreError>;
}
