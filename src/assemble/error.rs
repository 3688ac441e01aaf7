//! Error types for document assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading page images and writing the PDF.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Transport-level failure fetching a page image.
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The image URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// A page image request answered with a failure status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The image URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A downloaded image could not be decoded for embedding.
    #[error("could not decode page image {url}: {reason}")]
    ImageDecode {
        /// The image URL whose bytes failed to decode.
        url: String,
        /// Decoder message.
        reason: String,
    },

    /// File system error writing the final PDF.
    #[error("IO error writing {path}: {source}")]
    Io {
        /// The output path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// HTTP client construction failed.
    #[error("could not build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl AssembleError {
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

    /// Creates an image-decode error.
    pub fn image_decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageDecode {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
