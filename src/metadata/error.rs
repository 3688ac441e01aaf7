//! Error types for book metadata extraction.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors that can occur while extracting book metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Transport-level failure (DNS, connection, TLS, timeout) on a GET.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// A catalog endpoint answered with a failure status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// An expected embedded marker is absent from the fetched viewer page.
    #[error(
        "marker `{marker}` not found in viewer page {url}\n  Suggestion: check that the URL points at a book viewer page, not a listing"
    )]
    MarkerMissing {
        /// The marker that was searched for, e.g. `ag_pages`.
        marker: &'static str,
        /// The viewer page URL.
        url: String,
    },

    /// A page-count marker was present but its value does not fit a page count.
    #[error("viewer page {url} declares an unusable page count '{value}'")]
    InvalidPageCount {
        /// The raw captured value.
        value: String,
        /// The viewer page URL.
        url: String,
    },

    /// The historical index body is not the expected code-to-record mapping.
    #[error("could not decode historical index {url}: {source}")]
    IndexDecode {
        /// The index URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The historical index was fetched but does not contain the book code.
    #[error("book code '{code}' is not present in the historical index")]
    CodeNotInIndex {
        /// The code that was looked up.
        code: String,
    },

    /// The book URL itself is missing an expected segment.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// HTTP client construction failed.
    #[error("could not build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl MetadataError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a missing-marker error.
    pub fn marker_missing(marker: &'static str, url: impl Into<String>) -> Self {
        Self::MarkerMissing {
            marker,
            url: url.into(),
        }
    }

    /// Creates an index-decode error.
    pub fn index_decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::IndexDecode {
            url: url.into(),
            source,
        }
    }

    /// Creates a code-not-in-index error.
    pub fn code_not_in_index(code: impl Into<String>) -> Self {
        Self::CodeNotInIndex { code: code.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = MetadataError::http_status("https://libros.conaliteg.gob.mx/2023/P1LPM.htm", 404);
        let msg = err.to_string();
        assert!(msg.contains("404"), "Expected status in: {msg}");
        assert!(msg.contains("P1LPM.htm"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_marker_missing_display() {
        let err = MetadataError::marker_missing("ag_pages", "https://example.com/book.htm");
        let msg = err.to_string();
        assert!(msg.contains("ag_pages"), "Expected marker name in: {msg}");
        assert!(msg.contains("Suggestion"), "Expected suggestion in: {msg}");
    }

    #[test]
    fn test_code_not_in_index_display() {
        let err = MetadataError::code_not_in_index("ZZZ");
        let msg = err.to_string();
        assert!(msg.contains("'ZZZ'"), "Expected code in: {msg}");
        assert!(msg.contains("historical index"), "Expected stage in: {msg}");
    }

    #[test]
    fn test_catalog_error_passes_through() {
        let err = MetadataError::from(CatalogError::year_missing("https://example.com/x.htm"));
        assert!(err.to_string().contains("year"));
    }
}
