//! Directory listing shapes and pagination.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::business::Business;

/// Maximum number of records an unpaged directory query returns.
pub const UNPAGED_CAP: usize = 1000;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Query options for listing the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page number. When absent the full (capped) list is
    /// returned without an envelope.
    pub page: Option<u32>,
    /// Records per page.
    pub per_page: u32,
    /// Restrict to a single category slug.
    pub category: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: None,
            per_page: DEFAULT_PER_PAGE,
            category: None,
        }
    }
}

/// One page of the directory, with totals for pager rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPage {
    /// Records on this page.
    pub businesses: Vec<Business>,
    /// Total records matching the query across all pages.
    pub total: u64,
    /// 1-based page number served.
    pub page: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

/// Result of a directory query: a paged envelope when a page was
/// requested, otherwise a bare list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BusinessListing {
    /// Paginated envelope.
    Paged(BusinessPage),
    /// Bare list, capped at [`UNPAGED_CAP`] records.
    Unpaged(Vec<Business>),
}

impl BusinessListing {
    /// Records carried by the listing, regardless of shape.
    #[must_use]
    pub fn businesses(&self) -> &[Business] {
        match self {
            Self::Paged(page) => &page.businesses,
            Self::Unpaged(businesses) => businesses,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn paged_envelope_has_exactly_the_four_pager_keys() {
        let listing = BusinessListing::Paged(BusinessPage {
            businesses: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 1,
        });
        let Ok(value) = serde_json::to_value(&listing) else {
            panic!("listing should serialize");
        };
        let Some(object) = value.as_object() else {
            panic!("paged listing should serialize to an object");
        };
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["businesses", "page", "total", "totalPages"]);
    }

    #[test]
    fn unpaged_listing_serializes_to_a_bare_array() {
        let listing = BusinessListing::Unpaged(Vec::new());
        let Ok(value) = serde_json::to_value(&listing) else {
            panic!("listing should serialize");
        };
        assert!(value.is_array());
    }

    #[test]
    fn default_options_are_unpaged() {
        let options = ListOptions::default();
        assert_eq!(options.page, None);
        assert_eq!(options.per_page, DEFAULT_PER_PAGE);
        assert_eq!(options.category, None);
    }
}
