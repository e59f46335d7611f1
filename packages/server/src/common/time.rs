//! Tenant wall-clock handling.
//!
//! User-facing times are entered and displayed as `"YYYY-MM-DD HH:MM"` in the
//! tenant's fixed zone (UTC+9). Records keep full offset-aware timestamps;
//! conversion back to the wall clock happens only at the display edge.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M";
const TENANT_UTC_OFFSET_SECS: i32 = 9 * 3600;

pub fn tenant_tz() -> FixedOffset {
    FixedOffset::east_opt(TENANT_UTC_OFFSET_SECS).expect("Tenant offset is in range")
}

/// Parse user input in the fixed wall-clock format; `None` on any mismatch.
pub fn parse_wall_clock(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(input, WALL_CLOCK_FORMAT).ok()?;
    naive.and_local_timezone(tenant_tz()).single()
}

pub fn format_wall_clock(at: &DateTime<FixedOffset>) -> String {
    at.with_timezone(&tenant_tz())
        .format(WALL_CLOCK_FORMAT)
        .to_string()
}
