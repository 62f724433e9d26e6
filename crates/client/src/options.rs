// ABOUTME: Configuration options for the import client.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;

/// Maximum accepted response body size unless overridden (10 MiB).
/// Podcast feeds are rarely over a few megabytes; this bounds a hostile or
/// misconfigured origin.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for the import client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_body_bytes: usize,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "podsift/0.1".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            http_client: None,
            headers: HashMap::new(),
        }
    }
}

/// Builder for constructing [`Client`] instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the maximum accepted response body size in bytes.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.opts.max_body_bytes = limit;
        self
    }

    /// Use a pre-built HTTP client instead of constructing one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a header to every fetch request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}
