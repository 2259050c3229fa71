//! Business endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::business::Business;
use crate::domain::schedule::ScheduleStatus;

/// Query parameters for the email lookup endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    /// Contact email to look up.
    pub email: String,
}

/// Full profile payload: the stored record plus the operating status
/// resolved at request time.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDetailResponse {
    /// The stored listing.
    pub business: Business,
    /// Open/closed badge computed for the current local time.
    pub status: ScheduleStatus,
}
