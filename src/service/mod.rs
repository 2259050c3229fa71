//! Service layer: business logic orchestration.
//!
//! [`BusinessService`] fronts the two backing stores, owns the failover
//! state, and is the only path request handlers use to reach data.

pub mod business_service;

pub use business_service::BusinessService;
