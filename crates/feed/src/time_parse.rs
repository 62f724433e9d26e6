// ABOUTME: Best-effort parsing of RSS publish dates.
// ABOUTME: Tries RFC3339/RFC2822, named-timezone variants, then naive formats assumed UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Parses a feed date string, trying the formats seen in the wild.
/// Returns `None` when nothing matches; the caller keeps the raw string
/// either way.
pub fn parse_flexible_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // RFC2822 covers the canonical RSS pubDate shape with a numeric offset
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = parse_with_named_timezone(s) {
        return Some(dt);
    }

    let formats_with_tz = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%a, %e %b %Y %H:%M:%S %z",
        "%d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%z",
    ];
    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // No timezone information at all: assume UTC
    let formats_naive = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%a, %d %b %Y %H:%M:%S",
    ];
    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    None
}

/// Handles dates ending in a timezone abbreviation, which chrono's `%Z`
/// does not parse reliably.
fn parse_with_named_timezone(s: &str) -> Option<DateTime<Utc>> {
    const TZ_OFFSETS: &[(&str, i32)] = &[
        ("GMT", 0),
        ("UT", 0),
        ("UTC", 0),
        ("EST", -5 * 3600),
        ("EDT", -4 * 3600),
        ("CST", -6 * 3600),
        ("CDT", -5 * 3600),
        ("MST", -7 * 3600),
        ("MDT", -6 * 3600),
        ("PST", -8 * 3600),
        ("PDT", -7 * 3600),
        ("CET", 3600),
        ("CEST", 2 * 3600),
        ("BST", 3600),
        ("AEST", 10 * 3600),
        ("AEDT", 11 * 3600),
        ("JST", 9 * 3600),
    ];

    for (name, offset_secs) in TZ_OFFSETS {
        let Some(base) = s.strip_suffix(name) else {
            continue;
        };
        let base = base.trim_end();

        let formats = [
            "%a, %d %b %Y %H:%M:%S",
            "%a, %e %b %Y %H:%M:%S",
            "%d %b %Y %H:%M:%S",
        ];
        for fmt in &formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(base, fmt) {
                let offset = FixedOffset::east_opt(*offset_secs)?;
                let dt = offset.from_local_datetime(&naive).single()?;
                return Some(dt.with_timezone(&Utc));
            }
        }
    }

    None
}
