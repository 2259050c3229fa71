//! Opening-hours data shapes.
//!
//! Listings store their hours as free-form JSON authored by owners. Two
//! shapes are understood: a `weekday`/`weekend` pair where each side is
//! either a single window string (`"9:00 AM - 5:00 PM"`) or a per-day map
//! (`{"monday": "9-17", ...}`). Everything here is about turning that
//! loosely-typed input into a normalized seven-day table; interpreting the
//! window strings themselves happens in [`crate::domain::schedule`].

use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Owner-controlled override of the computed open/closed state.
///
/// When set, the override wins over any stored hours. `Unset` defers to
/// the hours-based resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ManualOverride {
    /// Owner forced the listing open.
    Open,
    /// Owner forced the listing closed.
    Closed,
    /// No override; status comes from the stored hours.
    #[default]
    Unset,
}

impl ManualOverride {
    /// Database representation. `Unset` is stored as NULL.
    #[must_use]
    pub fn as_db(self) -> Option<&'static str> {
        match self {
            Self::Open => Some("open"),
            Self::Closed => Some("closed"),
            Self::Unset => None,
        }
    }

    /// Parses the database representation. Unknown values degrade to
    /// `Unset` rather than failing the row.
    #[must_use]
    pub fn from_db(raw: Option<&str>) -> Self {
        match raw {
            Some("open") => Self::Open,
            Some("closed") => Self::Closed,
            _ => Self::Unset,
        }
    }
}

/// One side of a weekly schedule: the same window every day, or an
/// explicit per-day map keyed by day name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HoursSpec {
    /// A single window string applied to every day of the group.
    Uniform(String),
    /// Day-name keyed windows; a missing or null day means no hours.
    PerDay(HashMap<String, Option<String>>),
}

/// The stored hours shape: a weekday group and a weekend group, either of
/// which may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeeklyHours {
    /// Windows for Monday through Friday.
    #[serde(default)]
    pub weekday: Option<HoursSpec>,
    /// Windows for Saturday and Sunday.
    #[serde(default)]
    pub weekend: Option<HoursSpec>,
}

/// Per-day lookup names: lowercase first, then the capitalized spelling
/// owners sometimes use. Indexed Sunday through Saturday.
const DAY_NAMES: [(&str, &str); 7] = [
    ("sunday", "Sunday"),
    ("monday", "Monday"),
    ("tuesday", "Tuesday"),
    ("wednesday", "Wednesday"),
    ("thursday", "Thursday"),
    ("friday", "Friday"),
    ("saturday", "Saturday"),
];

/// Normalized weekly table, one optional window string per day, indexed
/// Sunday (0) through Saturday (6). Entries are trimmed; blank entries
/// become `None`. The literal string `"Closed"` is kept as-is and
/// interpreted during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayTable([Option<String>; 7]);

impl DayTable {
    /// Returns the raw window string for the given day, if any.
    #[must_use]
    pub fn entry(&self, day: Weekday) -> Option<&str> {
        let idx = day.num_days_from_sunday() as usize;
        self.0.get(idx).and_then(|slot| slot.as_deref())
    }
}

impl WeeklyHours {
    /// Flattens the weekday/weekend groups into a seven-day table.
    ///
    /// Saturday and Sunday draw from the weekend group, the rest from the
    /// weekday group. Per-day maps are consulted by lowercase day name
    /// first, falling back to the capitalized spelling; whichever key is
    /// present wins, even if its value is null.
    #[must_use]
    pub fn normalize(&self) -> DayTable {
        let mut table: [Option<String>; 7] = Default::default();
        for (slot, (idx, (lower, capitalized))) in
            table.iter_mut().zip(DAY_NAMES.iter().enumerate())
        {
            let group = if idx == 0 || idx == 6 {
                self.weekend.as_ref()
            } else {
                self.weekday.as_ref()
            };
            *slot = match group {
                Some(HoursSpec::Uniform(raw)) => clean(raw),
                Some(HoursSpec::PerDay(map)) => map
                    .get(*lower)
                    .or_else(|| map.get(*capitalized))
                    .and_then(|window| window.as_deref())
                    .and_then(clean),
                None => None,
            };
        }
        DayTable(table)
    }
}

/// Trims a window string, mapping blank input to `None`.
fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weekly(value: serde_json::Value) -> WeeklyHours {
        let Ok(hours) = serde_json::from_value(value) else {
            panic!("fixture should deserialize");
        };
        hours
    }

    #[test]
    fn uniform_string_applies_to_whole_group() {
        let hours = weekly(json!({
            "weekday": "9:00 AM - 5:00 PM",
            "weekend": "10:00 - 14:00",
        }));
        let table = hours.normalize();
        assert_eq!(table.entry(Weekday::Mon), Some("9:00 AM - 5:00 PM"));
        assert_eq!(table.entry(Weekday::Fri), Some("9:00 AM - 5:00 PM"));
        assert_eq!(table.entry(Weekday::Sat), Some("10:00 - 14:00"));
        assert_eq!(table.entry(Weekday::Sun), Some("10:00 - 14:00"));
    }

    #[test]
    fn per_day_map_is_consulted_by_day_name() {
        let hours = weekly(json!({
            "weekday": {
                "monday": "8:00-16:00",
                "wednesday": "10:00-18:00",
            },
        }));
        let table = hours.normalize();
        assert_eq!(table.entry(Weekday::Mon), Some("8:00-16:00"));
        assert_eq!(table.entry(Weekday::Tue), None);
        assert_eq!(table.entry(Weekday::Wed), Some("10:00-18:00"));
        assert_eq!(table.entry(Weekday::Sun), None);
    }

    #[test]
    fn capitalized_day_names_are_accepted() {
        let hours = weekly(json!({
            "weekend": { "Saturday": "9:00 AM - 1:00 PM" },
        }));
        let table = hours.normalize();
        assert_eq!(table.entry(Weekday::Sat), Some("9:00 AM - 1:00 PM"));
        assert_eq!(table.entry(Weekday::Sun), None);
    }

    #[test]
    fn lowercase_key_wins_even_when_null() {
        let hours = weekly(json!({
            "weekday": { "monday": null, "Monday": "9:00-17:00" },
        }));
        let table = hours.normalize();
        assert_eq!(table.entry(Weekday::Mon), None);
    }

    #[test]
    fn entries_are_trimmed_and_blanks_dropped() {
        let hours = weekly(json!({
            "weekday": "  9:00 - 17:00  ",
            "weekend": "   ",
        }));
        let table = hours.normalize();
        assert_eq!(table.entry(Weekday::Tue), Some("9:00 - 17:00"));
        assert_eq!(table.entry(Weekday::Sat), None);
    }

    #[test]
    fn missing_groups_yield_empty_days() {
        let table = WeeklyHours::default().normalize();
        assert_eq!(table.entry(Weekday::Mon), None);
        assert_eq!(table.entry(Weekday::Sun), None);
    }

    #[test]
    fn override_round_trips_through_db_form() {
        assert_eq!(ManualOverride::from_db(ManualOverride::Open.as_db()), ManualOverride::Open);
        assert_eq!(
            ManualOverride::from_db(ManualOverride::Closed.as_db()),
            ManualOverride::Closed
        );
        assert_eq!(ManualOverride::from_db(None), ManualOverride::Unset);
        assert_eq!(ManualOverride::from_db(Some("bogus")), ManualOverride::Unset);
    }
}
