//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::listing::{DEFAULT_PER_PAGE, ListOptions};

/// Directory query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Page number (1-indexed). Omit to receive the full (capped) list
    /// without a pagination envelope.
    pub page: Option<u32>,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Restrict results to a single category slug.
    pub category: Option<String>,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl ListParams {
    /// Clamps `page` and `per_page` to their allowed ranges.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.map(|p| p.max(1)),
            per_page: self.per_page.clamp(1, 100),
            category: self.category.clone(),
        }
    }

    /// Converts the query parameters into store-level options.
    #[must_use]
    pub fn into_options(self) -> ListOptions {
        let clamped = self.clamped();
        ListOptions {
            page: clamped.page,
            per_page: clamped.per_page,
            category: clamped.category.filter(|c| !c.trim().is_empty()),
        }
    }
}
