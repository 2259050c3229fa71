//! Data Transfer Objects for REST request/response serialization.

pub mod business_dto;
pub mod common_dto;

pub use business_dto::*;
pub use common_dto::*;
