// ABOUTME: Core feed parsing library for podsift.
// ABOUTME: Normalizes podcast RSS documents into podcast/episode records.

pub mod duration;
pub mod error;
pub mod models;
pub mod parser;
pub mod text;
pub mod time_parse;

pub use duration::parse_duration_seconds;
pub use error::FeedError;
pub use models::{Episode, ParsedFeed, Podcast};
pub use parser::parse_feed_bytes;
pub use text::{clean_text, decode_entities};
pub use time_parse::parse_flexible_time;
