// ABOUTME: HTTP import client for podsift.
// ABOUTME: Fetches a feed URL and hands the body to podsift-feed for normalization.

//! podsift-client - fetch a podcast RSS feed and normalize it.
//!
//! # Example
//!
//! ```no_run
//! use podsift_client::{Client, ImportError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ImportError> {
//!     let client = Client::builder().build();
//!     let feed = client.import("https://example.com/feed.xml").await?;
//!     println!("{} ({} episodes)", feed.podcast.title, feed.episodes.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod options;

pub use crate::client::Client;
pub use crate::error::ImportError;
pub use crate::options::{ClientBuilder, Options, DEFAULT_MAX_BODY_BYTES};
pub use podsift_feed::{Episode, ParsedFeed, Podcast};
