// ABOUTME: Error types for feed import operations.
// ABOUTME: Splits fetch-side failures from format failures so callers can tell them apart.

use podsift_feed::FeedError;
use thiserror::Error;

/// Errors surfaced by [`Client::import`](crate::Client::import).
///
/// All variants are fatal to the call; there is no retry and no partial
/// result. Item-level problems never reach this type.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The URL was empty, unparsable, or not http(s).
    #[error("invalid feed URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request could not be completed (network failure, timeout,
    /// or a response body over the configured size cap).
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// The server answered with a non-success status.
    #[error("feed {url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    /// The body was retrieved but is not an importable feed document.
    #[error("feed {url} could not be parsed: {source}")]
    Format {
        url: String,
        #[source]
        source: FeedError,
    },
}

impl ImportError {
    /// True when the feed could not be retrieved at all, including
    /// non-success HTTP statuses.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Status { .. })
    }

    /// True when the body was retrieved but had no parseable channel structure.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. })
    }
}
