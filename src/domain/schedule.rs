//! Opening-status resolution.
//!
//! [`resolve_status`] turns a listing's stored hours and owner override
//! into the open/closed badge shown on its public profile. The function is
//! total: malformed input degrades to a labeled default status instead of
//! failing, so a listing with broken hours still renders.
//!
//! Windows are read as same-day ranges. A window whose close time precedes
//! its open time (an overnight window such as `22:00-02:00`) is never
//! reported open; the close-before-open reading falls through to the plain
//! `Closed` branch at every probe time.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::hours::{ManualOverride, WeeklyHours};

/// Computed operating status for a single instant.
///
/// Recomputed on every query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    /// Whether the listing counts as open at the probed instant.
    pub is_open: bool,
    /// Human-readable badge text, e.g. `"Open · Closes at 17:00"`.
    pub message: String,
}

impl ScheduleStatus {
    fn open(message: impl Into<String>) -> Self {
        Self {
            is_open: true,
            message: message.into(),
        }
    }

    fn closed(message: impl Into<String>) -> Self {
        Self {
            is_open: false,
            message: message.into(),
        }
    }
}

/// Borrowed view of the schedule-relevant fields of a listing.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleView<'a> {
    /// Owner override; wins over the stored hours when set.
    pub manual_override: ManualOverride,
    /// Stored hours JSON, in whatever shape the owner saved.
    pub hours: &'a Value,
}

/// Resolves the operating status of a listing at `now` (local time).
///
/// Resolution order: owner override first, then the stored hours. Hours
/// that do not match either accepted shape yield `Hours not available`; a
/// day without a window (or one marked `closed`) yields `Closed Today`; a
/// window string that does not parse as a time range is passed through
/// verbatim with the listing treated as open, so free-form text like
/// `"by appointment"` surfaces unchanged.
#[must_use]
pub fn resolve_status(view: ScheduleView<'_>, now: NaiveDateTime) -> ScheduleStatus {
    match view.manual_override {
        ManualOverride::Open => return ScheduleStatus::open("Open Now (Owner set)"),
        ManualOverride::Closed => return ScheduleStatus::closed("Closed (Owner set)"),
        ManualOverride::Unset => {}
    }

    let weekly = if view.hours.is_null() {
        WeeklyHours::default()
    } else {
        match WeeklyHours::deserialize(view.hours) {
            Ok(weekly) => weekly,
            Err(_) => return ScheduleStatus::closed("Hours not available"),
        }
    };

    let table = weekly.normalize();
    let Some(raw) = table.entry(now.weekday()) else {
        return ScheduleStatus::closed("Closed Today");
    };
    if raw.eq_ignore_ascii_case("closed") {
        return ScheduleStatus::closed("Closed Today");
    }

    // First two '-'-separated parts form the window; anything beyond is
    // ignored. A string without a '-' cannot describe a window and is
    // surfaced verbatim.
    let mut parts = raw.split('-');
    let open_part = parts.next().map(str::trim);
    let close_part = parts.next().map(str::trim);
    let (Some(open_part), Some(close_part)) = (open_part, close_part) else {
        return ScheduleStatus::open(raw);
    };

    let (Some(open_min), Some(close_min)) = (parse_clock(open_part), parse_clock(close_part))
    else {
        return ScheduleStatus::open(raw);
    };

    let now_min = now.hour() * 60 + now.minute();
    if open_min <= now_min && now_min <= close_min {
        ScheduleStatus::open(format!("Open · Closes at {close_part}"))
    } else if now_min < open_min {
        ScheduleStatus::closed(format!("Closed · Opens at {open_part}"))
    } else {
        ScheduleStatus::closed("Closed")
    }
}

// ── Clock Parsing ───────────────────────────────────────────────────────

/// Parses a clock string to minutes since midnight.
///
/// Accepts 12-hour `H[:MM] AM|PM` (minute optional, `12 AM` is midnight,
/// `12 PM` is noon) and 24-hour `HH:MM` (1-2 digit hour, 2-digit minute).
fn parse_clock(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    parse_12h(trimmed).or_else(|| parse_24h(trimmed))
}

fn parse_12h(raw: &str) -> Option<u32> {
    let lowered = raw.to_ascii_lowercase();
    let (body, pm) = if let Some(rest) = lowered.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = lowered.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };
    let body = body.trim_end();
    let (hour, minute) = match body.split_once(':') {
        Some((h, m)) => (parse_digits(h, 1, 2)?, parse_digits(m, 2, 2)?),
        None => (parse_digits(body, 1, 2)?, 0),
    };
    let base = if hour == 12 { 0 } else { hour * 60 };
    Some(base + minute + if pm { 720 } else { 0 })
}

fn parse_24h(raw: &str) -> Option<u32> {
    let (hour, minute) = raw.split_once(':')?;
    Some(parse_digits(hour, 1, 2)? * 60 + parse_digits(minute, 2, 2)?)
}

/// Parses a run of ASCII digits whose length falls within the given bounds.
fn parse_digits(raw: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if raw.len() < min_len || raw.len() > max_len || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    // 2026-03-02 is a Monday, 2026-03-07 a Saturday.
    fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        at(2026, 3, 2, hour, minute)
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        let Some(instant) =
            NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(hour, minute, 0))
        else {
            panic!("probe instant should be valid");
        };
        instant
    }

    fn resolve(hours: &Value, now: NaiveDateTime) -> ScheduleStatus {
        resolve_status(
            ScheduleView {
                manual_override: ManualOverride::Unset,
                hours,
            },
            now,
        )
    }

    #[test]
    fn owner_override_wins_regardless_of_hours() {
        let hours = json!({ "weekday": "9:00-17:00" });
        let open = resolve_status(
            ScheduleView {
                manual_override: ManualOverride::Open,
                hours: &hours,
            },
            monday_at(3, 0),
        );
        assert_eq!(open, ScheduleStatus::open("Open Now (Owner set)"));

        let closed = resolve_status(
            ScheduleView {
                manual_override: ManualOverride::Closed,
                hours: &hours,
            },
            monday_at(12, 0),
        );
        assert_eq!(closed, ScheduleStatus::closed("Closed (Owner set)"));
    }

    #[test]
    fn missing_day_reports_closed_today() {
        let absent = resolve(&Value::Null, monday_at(12, 0));
        assert_eq!(absent, ScheduleStatus::closed("Closed Today"));

        let empty = resolve(&json!({ "weekend": "10:00-14:00" }), monday_at(12, 0));
        assert_eq!(empty, ScheduleStatus::closed("Closed Today"));
    }

    #[test]
    fn closed_marker_is_case_insensitive() {
        for marker in ["Closed", "closed", "CLOSED"] {
            let status = resolve(&json!({ "weekday": marker }), monday_at(12, 0));
            assert_eq!(status, ScheduleStatus::closed("Closed Today"));
        }
    }

    #[test]
    fn within_window_reports_closing_time() {
        let status = resolve(&json!({ "weekday": "09:00-17:00" }), monday_at(12, 0));
        assert_eq!(status, ScheduleStatus::open("Open · Closes at 17:00"));
    }

    #[test]
    fn before_window_reports_opening_time() {
        let status = resolve(&json!({ "weekday": "09:00-17:00" }), monday_at(7, 30));
        assert_eq!(status, ScheduleStatus::closed("Closed · Opens at 09:00"));
    }

    #[test]
    fn after_window_reports_closed() {
        let status = resolve(&json!({ "weekday": "09:00-17:00" }), monday_at(18, 0));
        assert_eq!(status, ScheduleStatus::closed("Closed"));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let hours = json!({ "weekday": "09:00-17:00" });
        assert!(resolve(&hours, monday_at(9, 0)).is_open);
        assert!(resolve(&hours, monday_at(17, 0)).is_open);
        assert!(!resolve(&hours, monday_at(17, 1)).is_open);
        assert!(!resolve(&hours, monday_at(8, 59)).is_open);
    }

    #[test]
    fn twelve_hour_windows_match_their_24_hour_form() {
        let am_pm = json!({ "weekday": "9:00 AM - 5:00 PM" });
        let status = resolve(&am_pm, monday_at(12, 0));
        assert_eq!(status, ScheduleStatus::open("Open · Closes at 5:00 PM"));

        assert!(!resolve(&am_pm, monday_at(8, 59)).is_open);
        assert!(resolve(&am_pm, monday_at(9, 0)).is_open);
        assert!(resolve(&am_pm, monday_at(17, 0)).is_open);
        assert!(!resolve(&am_pm, monday_at(17, 1)).is_open);
    }

    #[test]
    fn noon_and_midnight_parse_correctly() {
        assert_eq!(parse_clock("12 AM"), Some(0));
        assert_eq!(parse_clock("12:30 AM"), Some(30));
        assert_eq!(parse_clock("12 PM"), Some(720));
        assert_eq!(parse_clock("12:30 PM"), Some(750));
        assert_eq!(parse_clock("1 PM"), Some(780));
        assert_eq!(parse_clock("11:59 PM"), Some(1439));
    }

    #[test]
    fn malformed_clock_strings_are_rejected() {
        assert_eq!(parse_clock("noonish"), None);
        assert_eq!(parse_clock("9"), None);
        assert_eq!(parse_clock("9:5"), None);
        assert_eq!(parse_clock("123:00"), None);
        assert_eq!(parse_clock(""), None);
    }

    #[test]
    fn free_form_window_passes_through_verbatim() {
        let status = resolve(&json!({ "weekday": "by appointment" }), monday_at(12, 0));
        assert_eq!(status, ScheduleStatus::open("by appointment"));
    }

    #[test]
    fn unparseable_range_passes_through_verbatim() {
        let status = resolve(&json!({ "weekday": "dawn - dusk" }), monday_at(12, 0));
        assert_eq!(status, ScheduleStatus::open("dawn - dusk"));
    }

    #[test]
    fn unrecognized_hours_shape_is_flagged_unavailable() {
        let status = resolve(&json!(["9:00", "17:00"]), monday_at(12, 0));
        assert_eq!(status, ScheduleStatus::closed("Hours not available"));

        let status = resolve(&json!({ "weekday": 900 }), monday_at(12, 0));
        assert_eq!(status, ScheduleStatus::closed("Hours not available"));
    }

    #[test]
    fn weekend_days_use_the_weekend_group() {
        let hours = json!({
            "weekday": "09:00-17:00",
            "weekend": { "saturday": "10:00-14:00" },
        });
        let saturday = at(2026, 3, 7, 12, 0);
        assert_eq!(
            resolve(&hours, saturday),
            ScheduleStatus::open("Open · Closes at 14:00")
        );

        let sunday = at(2026, 3, 8, 12, 0);
        assert_eq!(resolve(&hours, sunday), ScheduleStatus::closed("Closed Today"));
    }

    #[test]
    fn overnight_window_never_reports_open() {
        let hours = json!({ "weekday": "22:00-02:00" });
        assert!(!resolve(&hours, monday_at(23, 0)).is_open);
        assert!(!resolve(&hours, monday_at(1, 0)).is_open);
        assert_eq!(resolve(&hours, monday_at(23, 0)), ScheduleStatus::closed("Closed"));
    }
}
