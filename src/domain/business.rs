//! Business listing records.
//!
//! [`Business`] is the stored record, [`BusinessDraft`] the owner-supplied
//! input for creation, and [`BusinessUpdate`] a partial patch. The wire
//! representation is camelCase throughout, matching what the profile pages
//! consume.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::business_id::BusinessId;
use super::hours::ManualOverride;
use super::schedule::{self, ScheduleStatus, ScheduleView};

/// A registered business listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Store-assigned identifier.
    pub id: BusinessId,
    /// Identity-provider id of the owning account, once claimed.
    pub owner_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Contact email; unique across listings.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Public website URL.
    pub website: Option<String>,
    /// Free-form description shown on the profile page.
    pub description: Option<String>,
    /// Directory category slug.
    pub category: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Owner-authored opening hours, kept as loosely-typed JSON.
    pub hours: Value,
    /// Owner override of the computed open/closed state.
    #[serde(default)]
    pub manual_override: ManualOverride,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// Borrowed view of the fields the schedule resolver consumes.
    #[must_use]
    pub fn schedule_view(&self) -> ScheduleView<'_> {
        ScheduleView {
            manual_override: self.manual_override,
            hours: &self.hours,
        }
    }

    /// Resolves the operating status of this listing at `now`.
    #[must_use]
    pub fn schedule_status(&self, now: NaiveDateTime) -> ScheduleStatus {
        schedule::resolve_status(self.schedule_view(), now)
    }
}

/// Owner-supplied input for creating a listing.
///
/// Only name and email are required; every other field defaults to empty.
/// The manual override is not part of the draft, it is an owner action
/// applied after creation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDraft {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Identity-provider id of the creating account.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Public website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Directory category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Opening hours JSON.
    #[serde(default)]
    pub hours: Option<Value>,
}

impl BusinessDraft {
    /// Materializes the draft into a full record, filling absent fields
    /// with defaults.
    #[must_use]
    pub fn into_business(self, id: BusinessId, now: DateTime<Utc>) -> Business {
        Business {
            id,
            owner_id: self.owner_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            website: self.website,
            description: self.description,
            category: self.category,
            address: self.address,
            city: self.city,
            image_url: self.image_url,
            hours: self.hours.unwrap_or(Value::Null),
            manual_override: ManualOverride::Unset,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial patch for an existing listing.
///
/// Absent fields are left untouched. The manual override is cleared by
/// sending its `unset` variant explicitly; omitting it keeps the current
/// value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUpdate {
    /// New owning account id.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// New website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// New street address.
    #[serde(default)]
    pub address: Option<String>,
    /// New city.
    #[serde(default)]
    pub city: Option<String>,
    /// New cover image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// New opening hours JSON.
    #[serde(default)]
    pub hours: Option<Value>,
    /// New override state, including `unset` to clear it.
    #[serde(default)]
    pub manual_override: Option<ManualOverride>,
}

impl BusinessUpdate {
    /// Merges the patch into `business`, bumping its modification time.
    pub fn apply(&self, business: &mut Business, now: DateTime<Utc>) {
        if let Some(owner_id) = &self.owner_id {
            business.owner_id = Some(owner_id.clone());
        }
        if let Some(name) = &self.name {
            business.name = name.clone();
        }
        if let Some(email) = &self.email {
            business.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            business.phone = Some(phone.clone());
        }
        if let Some(website) = &self.website {
            business.website = Some(website.clone());
        }
        if let Some(description) = &self.description {
            business.description = Some(description.clone());
        }
        if let Some(category) = &self.category {
            business.category = Some(category.clone());
        }
        if let Some(address) = &self.address {
            business.address = Some(address.clone());
        }
        if let Some(city) = &self.city {
            business.city = Some(city.clone());
        }
        if let Some(image_url) = &self.image_url {
            business.image_url = Some(image_url.clone());
        }
        if let Some(hours) = &self.hours {
            business.hours = hours.clone();
        }
        if let Some(manual_override) = self.manual_override {
            business.manual_override = manual_override;
        }
        business.updated_at = now;
    }
}
