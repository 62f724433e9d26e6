// ABOUTME: The import client: one GET per call, then parse and normalize.
// ABOUTME: Fatal on fetch/status/format problems; no retry, no partial results.

use podsift_feed::{parse_feed_bytes, FeedError, ParsedFeed};
use tracing::debug;

use crate::error::ImportError;
use crate::options::{ClientBuilder, Options};

/// Imports podcast feeds over HTTP.
///
/// The client is purely functional over its input: no shared mutable state
/// between calls, nothing cached, nothing persisted. Construction is the
/// only place configuration happens.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    /// Fetches `rss_url` and normalizes the response into a [`ParsedFeed`].
    ///
    /// One GET, no retry: an unreachable URL or non-success status fails the
    /// whole call, as does a body with no `<channel>` structure. A successful
    /// parse may still contain zero episodes.
    pub async fn import(&self, rss_url: &str) -> Result<ParsedFeed, ImportError> {
        let body = self.fetch_bytes(rss_url).await?;

        let parsed = parse_feed_bytes(&body).map_err(|source: FeedError| ImportError::Format {
            url: rss_url.to_string(),
            source,
        })?;

        debug!(
            url = rss_url,
            episodes = parsed.items_imported,
            excluded = parsed.items_seen - parsed.items_imported,
            "imported feed"
        );
        Ok(parsed)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ImportError> {
        if url.is_empty() {
            return Err(ImportError::InvalidUrl {
                url: url.to_string(),
                reason: "URL is empty".to_string(),
            });
        }

        let parsed_url = url::Url::parse(url).map_err(|e| ImportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let scheme = parsed_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ImportError::InvalidUrl {
                url: url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let mut request = self.http_client.get(url);
        for (key, value) in &self.opts.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| ImportError::Fetch {
            url: url.to_string(),
            source: anyhow::anyhow!("request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Reject oversized responses from the declared length when available,
        // and from the actual body length regardless.
        if let Some(len) = response.content_length() {
            if len as usize > self.opts.max_body_bytes {
                return Err(ImportError::Fetch {
                    url: url.to_string(),
                    source: anyhow::anyhow!(
                        "response too large: {len} bytes (limit {})",
                        self.opts.max_body_bytes
                    ),
                });
            }
        }

        let body = response.bytes().await.map_err(|e| ImportError::Fetch {
            url: url.to_string(),
            source: anyhow::anyhow!("failed to read body: {e}"),
        })?;

        if body.len() > self.opts.max_body_bytes {
            return Err(ImportError::Fetch {
                url: url.to_string(),
                source: anyhow::anyhow!(
                    "response too large: {} bytes (limit {})",
                    body.len(),
                    self.opts.max_body_bytes
                ),
            });
        }

        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched feed");
        Ok(body.to_vec())
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
