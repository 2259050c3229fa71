//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::BusinessService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Store facade for all business logic.
    pub business_service: Arc<BusinessService>,
}
