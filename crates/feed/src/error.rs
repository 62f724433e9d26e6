// ABOUTME: Error types for feed parsing operations.
// ABOUTME: Document-level failures only; malformed item fields degrade to defaults instead.

use thiserror::Error;

/// Errors that can occur while parsing a feed document.
///
/// Only document-level problems are fatal. Missing or malformed fields on an
/// individual item never produce an error; they resolve to documented
/// defaults so one bad episode cannot sink the rest of the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The document contains no `<channel>` element, so there is nothing to import.
    #[error("no <channel> element found in feed document")]
    MissingChannel,
}
