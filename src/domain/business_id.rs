//! Type-safe business identifier.
//!
//! [`BusinessId`] is a newtype wrapper around the store-assigned id string,
//! providing type safety so that listing identifiers cannot be confused
//! with other strings such as owner ids or emails.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a business listing.
///
/// The id is assigned by whichever store created the record: the primary
/// store assigns a UUID v4 string, while the in-memory fallback synthesizes
/// a `mem-<millis>-<suffix>` id so fallback-born records remain
/// recognizable. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct BusinessId(String);

impl BusinessId {
    /// Creates a new random `BusinessId` (UUID v4), the primary-store format.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Synthesizes a fallback-store id from the creation instant plus a
    /// random suffix, so repeated creates in the same millisecond still
    /// yield distinct ids.
    #[must_use]
    pub fn synthesize(now: DateTime<Utc>) -> Self {
        let (suffix, ..) = uuid::Uuid::new_v4().as_fields();
        Self(format!("mem-{}-{suffix:08x}", now.timestamp_millis()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BusinessId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for BusinessId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<BusinessId> for String {
    fn from(id: BusinessId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn generate_creates_unique_ids() {
        let a = BusinessId::generate();
        let b = BusinessId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn synthesize_is_prefixed_and_unique() {
        let now = Utc::now();
        let a = BusinessId::synthesize(now);
        let b = BusinessId::synthesize(now);
        assert!(a.as_str().starts_with("mem-"));
        assert_ne!(a, b);
    }

    #[test]
    fn display_matches_inner() {
        let id = BusinessId::from("abc-123");
        assert_eq!(format!("{id}"), "abc-123");
    }

    #[test]
    fn serde_is_transparent() {
        let id = BusinessId::from("abc-123");
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"abc-123\"");

        let back: Option<BusinessId> = serde_json::from_str(&json).ok();
        let Some(back) = back else {
            panic!("deserialization failed");
        };
        assert_eq!(back, id);
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = BusinessId::generate();
        let mut map = HashMap::new();
        map.insert(id.clone(), "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }
}
