//! Domain layer: listing records, opening hours, and status resolution.
//!
//! This module contains the server-side domain model including business
//! identity, the stored record with its draft and patch forms, the
//! opening-hours shapes, the schedule resolver, and the directory
//! listing/pagination types.

pub mod business;
pub mod business_id;
pub mod hours;
pub mod listing;
pub mod schedule;

pub use business::{Business, BusinessDraft, BusinessUpdate};
pub use business_id::BusinessId;
pub use hours::ManualOverride;
pub use listing::{BusinessListing, BusinessPage, ListOptions};
pub use schedule::{resolve_status, ScheduleStatus, ScheduleView};
