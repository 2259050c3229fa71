//! Resident in-memory business store.
//!
//! Backs the service facade when the primary store is unreachable. The
//! dataset lives in a `tokio::sync::RwLock`-guarded list, is optionally
//! seeded with fixture listings at startup, is never persisted, and
//! resets on process restart. Every operation succeeds by construction;
//! there is no I/O to fail.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use super::{BusinessStore, StoreError};
use crate::domain::business::{Business, BusinessDraft, BusinessUpdate};
use crate::domain::business_id::BusinessId;
use crate::domain::hours::ManualOverride;
use crate::domain::listing::{BusinessListing, BusinessPage, ListOptions};

/// In-memory substitute dataset with the same CRUD surface as the
/// primary store.
#[derive(Debug, Default)]
pub struct MemoryBusinessStore {
    records: RwLock<Vec<Business>>,
}

impl MemoryBusinessStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with demo listings, so the directory
    /// renders something useful while running without a database.
    #[must_use]
    pub fn seeded() -> Self {
        let bakery = seed_fixture(
            "seed-0001",
            "Juniper & Rye Bakery",
            "hello@juniperandrye.example",
            "bakery",
            json!({
                "weekday": {
                    "monday": "7:00 AM - 3:00 PM",
                    "tuesday": "7:00 AM - 3:00 PM",
                    "wednesday": "7:00 AM - 3:00 PM",
                    "thursday": "7:00 AM - 3:00 PM",
                    "friday": "7:00 AM - 5:00 PM",
                },
                "weekend": "8:00 AM - 2:00 PM",
            }),
        );
        let bookshop = seed_fixture(
            "seed-0002",
            "Paper Lantern Books",
            "shop@paperlantern.example",
            "books",
            json!({
                "weekday": "10:00-18:00",
                "weekend": { "saturday": "10:00-16:00", "sunday": "Closed" },
            }),
        );
        // Closed for the season via owner override.
        let mut cycles = seed_fixture(
            "seed-0003",
            "Cadence Cycle Repair",
            "fix@cadencecycles.example",
            "repair",
            json!({ "weekday": "9:00-17:30" }),
        );
        cycles.manual_override = ManualOverride::Closed;

        Self {
            records: RwLock::new(vec![bakery, bookshop, cycles]),
        }
    }

    /// Creates a listing, synthesizing a unique id.
    pub async fn create(&self, draft: BusinessDraft) -> Business {
        let now = Utc::now();
        let business = draft.into_business(BusinessId::synthesize(now), now);
        self.records.write().await.push(business.clone());
        business
    }

    /// Fetches a listing by id.
    pub async fn get_by_id(&self, id: &BusinessId) -> Option<Business> {
        let records = self.records.read().await;
        records.iter().find(|b| &b.id == id).cloned()
    }

    /// Fetches a listing by contact email, case-insensitively.
    pub async fn get_by_email(&self, email: &str) -> Option<Business> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|b| b.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Fetches the listing owned by the given account.
    pub async fn get_by_owner(&self, owner_id: &str) -> Option<Business> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|b| b.owner_id.as_deref() == Some(owner_id))
            .cloned()
    }

    /// Applies a patch, returning the updated record or `None` for an
    /// unknown id.
    pub async fn update(&self, id: &BusinessId, patch: &BusinessUpdate) -> Option<Business> {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|b| &b.id == id)?;
        patch.apply(record, Utc::now());
        Some(record.clone())
    }

    /// Removes a listing, returning it or `None` for an unknown id.
    pub async fn delete(&self, id: &BusinessId) -> Option<Business> {
        let mut records = self.records.write().await;
        let idx = records.iter().position(|b| &b.id == id)?;
        Some(records.remove(idx))
    }

    /// Queries the resident dataset.
    ///
    /// The full filtered list is always returned. When a page was
    /// requested the list is wrapped in a synthetic single-page envelope
    /// (`page = 1`, `totalPages = 1`) so the caller-visible shape matches
    /// the primary store's paginated responses.
    pub async fn list(&self, options: &ListOptions) -> BusinessListing {
        let records = self.records.read().await;
        let filtered: Vec<Business> = records
            .iter()
            .filter(|b| matches_category(b, options.category.as_deref()))
            .cloned()
            .collect();

        if options.page.is_some() {
            let total = filtered.len() as u64;
            BusinessListing::Paged(BusinessPage {
                businesses: filtered,
                total,
                page: 1,
                total_pages: 1,
            })
        } else {
            BusinessListing::Unpaged(filtered)
        }
    }

    /// Number of resident listings.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no listings.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn matches_category(business: &Business, category: Option<&str>) -> bool {
    match category {
        Some(wanted) => business
            .category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
        None => true,
    }
}

fn seed_fixture(
    id: &str,
    name: &str,
    email: &str,
    category: &str,
    hours: serde_json::Value,
) -> Business {
    let now = Utc::now();
    Business {
        id: BusinessId::from(id),
        owner_id: None,
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        website: None,
        description: Some(format!("{name} (demo listing)")),
        category: Some(category.to_string()),
        address: None,
        city: Some("Springfield".to_string()),
        image_url: None,
        hours,
        manual_override: ManualOverride::Unset,
        created_at: now,
        updated_at: now,
    }
}

/// The substitute store also satisfies the common seam, which keeps test
/// doubles and store-agnostic callers simple. In-memory operations never
/// fail, so every method simply wraps its infallible counterpart.
#[async_trait]
impl BusinessStore for MemoryBusinessStore {
    async fn probe(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, draft: BusinessDraft) -> Result<Business, StoreError> {
        Ok(Self::create(self, draft).await)
    }

    async fn get_by_id(&self, id: &BusinessId) -> Result<Option<Business>, StoreError> {
        Ok(Self::get_by_id(self, id).await)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Business>, StoreError> {
        Ok(Self::get_by_email(self, email).await)
    }

    async fn get_by_owner(&self, owner_id: &str) -> Result<Option<Business>, StoreError> {
        Ok(Self::get_by_owner(self, owner_id).await)
    }

    async fn update(
        &self,
        id: &BusinessId,
        patch: &BusinessUpdate,
    ) -> Result<Option<Business>, StoreError> {
        Ok(Self::update(self, id, patch).await)
    }

    async fn delete(&self, id: &BusinessId) -> Result<Option<Business>, StoreError> {
        Ok(Self::delete(self, id).await)
    }

    async fn list(&self, options: &ListOptions) -> Result<BusinessListing, StoreError> {
        Ok(Self::list(self, options).await)
    }
}
