// ABOUTME: Domain models for an imported podcast feed.
// ABOUTME: Serialized with camelCase field names to match the caller-facing JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel-level podcast metadata, derived once per import.
///
/// String fields default to `""` when the feed omits them; `language`
/// defaults to `"en"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub title: String,
    pub description: String,
    pub language: String,
    pub author_name: String,
    pub author_email: String,
    pub website_url: String,
    pub category: String,
    pub is_explicit: bool,
    pub cover_image_url: String,
}

/// A single episode, built from an `<item>` that carries an audio enclosure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub title: String,
    pub description: String,
    /// Enclosure URL. Items without one are excluded from the import.
    pub audio_url: String,
    /// Enclosure `length` attribute; 0 when missing or unparsable.
    pub file_size_bytes: u64,
    /// Normalized from `HH:MM:SS`, `MM:SS`, or bare seconds; 0 on failure.
    pub duration_seconds: u32,
    /// The raw `<pubDate>` text as found in the feed, no timezone normalization.
    pub publish_date: String,
    /// Best-effort parse of `publish_date`; `None` when no known format matches.
    pub published_at: Option<DateTime<Utc>>,
    /// `Some(n)` only when the feed provides a parsable integer. `None` means
    /// "not provided", which is distinct from an explicit episode zero.
    pub episode_number: Option<u32>,
    pub season_number: Option<u32>,
}

/// The result of one import: podcast metadata plus episodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFeed {
    pub podcast: Podcast,
    pub episodes: Vec<Episode>,
    /// Count of `<item>` elements seen in the document.
    pub items_seen: usize,
    /// Count of items that carried an enclosure URL and became episodes.
    pub items_imported: usize,
}
