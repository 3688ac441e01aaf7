//! Shared HTTP client construction policy.
//!
//! Centralizes networking defaults so the metadata scrape and the page-image
//! fetch loop stay consistent on timeout, user-agent, and compression.

use std::time::Duration;

use reqwest::Client;

/// Connect timeout for all catalog requests.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Read timeout for all catalog requests. Page images are small scans, so a
/// short timeout is enough; override via [`build_http_client_with_timeout`].
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent identifying the tool (good citizenship; RFC 9308).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("conaliteg-dl/{version} (textbook-archiver)")
}

/// Builds the shared HTTP client with project timeouts.
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] when client construction fails.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    build_http_client_with_timeout(READ_TIMEOUT_SECS)
}

/// Builds the shared HTTP client with an explicit read timeout.
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] when client construction fails.
pub fn build_http_client_with_timeout(read_timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(read_timeout_secs))
        .user_agent(default_user_agent())
        .gzip(true)
        .build()
}
