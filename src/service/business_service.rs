//! Business service: the store facade with one-way failover.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;

use crate::domain::business::{Business, BusinessDraft, BusinessUpdate};
use crate::domain::business_id::BusinessId;
use crate::domain::listing::{BusinessListing, ListOptions};
use crate::persistence::{BusinessStore, MemoryBusinessStore, StoreError};

/// Facade over the primary store and the in-memory substitute.
///
/// Every operation follows the pattern: ensure the initial connectivity
/// probe has run → try the primary store if it is still trusted → on
/// failure, flip to the fallback dataset and serve from there. The flip
/// is permanent for the process lifetime; the primary is never re-probed
/// once it has failed, and records written to the two stores are never
/// reconciled.
///
/// The probe is memoized through a [`OnceCell`], so concurrent first
/// requests share a single probe instead of racing to run their own.
/// Fallback operations are infallible by construction, which keeps every
/// facade method total.
#[derive(Debug)]
pub struct BusinessService {
    primary: Option<Arc<dyn BusinessStore>>,
    fallback: MemoryBusinessStore,
    connection_checked: OnceCell<bool>,
    using_fallback: AtomicBool,
}

impl BusinessService {
    /// Creates a facade over an optional primary store and a fallback
    /// dataset. Without a primary there is nothing to probe; the facade
    /// starts directly in fallback mode.
    #[must_use]
    pub fn new(primary: Option<Arc<dyn BusinessStore>>, fallback: MemoryBusinessStore) -> Self {
        let no_primary = primary.is_none();
        Self {
            primary,
            fallback,
            connection_checked: if no_primary {
                OnceCell::new_with(Some(false))
            } else {
                OnceCell::new()
            },
            using_fallback: AtomicBool::new(no_primary),
        }
    }

    /// Returns a reference to the fallback dataset.
    #[must_use]
    pub fn fallback(&self) -> &MemoryBusinessStore {
        &self.fallback
    }

    /// Whether operations are currently served from the fallback dataset.
    ///
    /// Runs the initial connectivity probe if no check has ever occurred;
    /// afterwards it reports the sticky state without fresh probes.
    pub async fn is_using_fallback(&self) -> bool {
        let _ = self.primary_ready().await;
        self.using_fallback.load(Ordering::SeqCst)
    }

    /// Returns the primary store if it passed the initial probe and has
    /// not failed since.
    async fn primary_ready(&self) -> Option<&Arc<dyn BusinessStore>> {
        let primary = self.primary.as_ref()?;
        let reachable = *self
            .connection_checked
            .get_or_init(|| async {
                match primary.probe().await {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            "primary store unreachable; switching to fallback dataset permanently"
                        );
                        self.using_fallback.store(true, Ordering::SeqCst);
                        false
                    }
                }
            })
            .await;

        if reachable && !self.using_fallback.load(Ordering::SeqCst) {
            Some(primary)
        } else {
            None
        }
    }

    /// Flips to the fallback dataset after a primary operation failure.
    fn trip_failover(&self, err: &StoreError) {
        let already_tripped = self.using_fallback.swap(true, Ordering::SeqCst);
        if !already_tripped {
            tracing::warn!(
                error = %err,
                "primary store operation failed; switching to fallback dataset permanently"
            );
        }
    }

    /// Creates a listing in the active store.
    pub async fn create(&self, draft: BusinessDraft) -> Business {
        if let Some(primary) = self.primary_ready().await {
            match primary.create(draft.clone()).await {
                Ok(business) => {
                    tracing::info!(business_id = %business.id, "business created");
                    return business;
                }
                Err(err) => self.trip_failover(&err),
            }
        }

        let business = self.fallback.create(draft).await;
        tracing::info!(business_id = %business.id, "business created in fallback dataset");
        business
    }

    /// Fetches a listing by id from the active store.
    pub async fn get_by_id(&self, id: &BusinessId) -> Option<Business> {
        if let Some(primary) = self.primary_ready().await {
            match primary.get_by_id(id).await {
                Ok(found) => return found,
                Err(err) => self.trip_failover(&err),
            }
        }
        self.fallback.get_by_id(id).await
    }

    /// Fetches a listing by contact email from the active store.
    pub async fn get_by_email(&self, email: &str) -> Option<Business> {
        if let Some(primary) = self.primary_ready().await {
            match primary.get_by_email(email).await {
                Ok(found) => return found,
                Err(err) => self.trip_failover(&err),
            }
        }
        self.fallback.get_by_email(email).await
    }

    /// Fetches the listing owned by the given account from the active
    /// store.
    pub async fn get_by_owner(&self, owner_id: &str) -> Option<Business> {
        if let Some(primary) = self.primary_ready().await {
            match primary.get_by_owner(owner_id).await {
                Ok(found) => return found,
                Err(err) => self.trip_failover(&err),
            }
        }
        self.fallback.get_by_owner(owner_id).await
    }

    /// Applies a patch in the active store, returning the updated record
    /// or `None` for an unknown id.
    pub async fn update(&self, id: &BusinessId, patch: &BusinessUpdate) -> Option<Business> {
        if let Some(primary) = self.primary_ready().await {
            match primary.update(id, patch).await {
                Ok(updated) => return updated,
                Err(err) => self.trip_failover(&err),
            }
        }
        self.fallback.update(id, patch).await
    }

    /// Deletes a listing in the active store, returning the removed
    /// record or `None` for an unknown id.
    pub async fn delete(&self, id: &BusinessId) -> Option<Business> {
        let removed = if let Some(primary) = self.primary_ready().await {
            match primary.delete(id).await {
                Ok(removed) => Some(removed),
                Err(err) => {
                    self.trip_failover(&err);
                    None
                }
            }
        } else {
            None
        };

        let removed = match removed {
            Some(removed) => removed,
            None => self.fallback.delete(id).await,
        };

        if removed.is_some() {
            tracing::info!(%id, "business deleted");
        }
        removed
    }

    /// Queries the directory through the active store.
    pub async fn list(&self, options: &ListOptions) -> BusinessListing {
        if let Some(primary) = self.primary_ready().await {
            match primary.list(options).await {
                Ok(listing) => return listing,
                Err(err) => self.trip_failover(&err),
            }
        }
        self.fallback.list(options).await
    }
}
