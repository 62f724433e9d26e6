// ABOUTME: Integration tests for the normalization helpers exposed by podsift-feed.
// ABOUTME: Exercises clean_text, duration parsing, and flexible date parsing through the public API.

use podsift_feed::{clean_text, parse_duration_seconds, parse_flexible_time};
use pretty_assertions::assert_eq;

#[test]
fn clean_text_contract() {
    assert_eq!(clean_text("<p>Hello &amp; welcome</p>"), "Hello & welcome");
    assert_eq!(clean_text("<![CDATA[<b>notes</b>]]>"), "notes");
    assert_eq!(clean_text("  plain\n\ttext  "), "plain text");
}

#[test]
fn duration_contract() {
    assert_eq!(parse_duration_seconds("01:02:03"), 3723);
    assert_eq!(parse_duration_seconds("05:30"), 330);
    assert_eq!(parse_duration_seconds("45"), 45);
    assert_eq!(parse_duration_seconds("notanumber"), 0);
}

#[test]
fn flexible_time_accepts_rss_dates() {
    assert!(parse_flexible_time("Mon, 15 Jan 2024 10:00:00 +0000").is_some());
    assert!(parse_flexible_time("2024-01-15T10:00:00Z").is_some());
    assert!(parse_flexible_time("someday soon").is_none());
}
