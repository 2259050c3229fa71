//! # vitrine-gateway
//!
//! REST gateway for the Vitrine local business directory.
//!
//! This crate serves business listings over HTTP: registration, profile
//! pages with a computed open/closed status, owner dashboard lookups,
//! and directory browsing. Listings live in PostgreSQL when it is
//! reachable; otherwise the service runs against a resident in-memory
//! dataset for the rest of the process lifetime.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── BusinessService (service/)
//!     │       └── one-way failover: primary → fallback
//!     │
//!     ├── Schedule Resolver (domain/)
//!     │
//!     ├── PostgresBusinessStore (persistence/)
//!     └── MemoryBusinessStore (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
