//! Error types for catalog URL classification and extraction.

use thiserror::Error;

/// Errors that can occur while classifying a book URL or extracting
/// fields from it.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The URL matches neither the current nor the historical catalog pattern.
    #[error(
        "unrecognized book URL '{url}'\n  Suggestion: use https://libros.conaliteg.gob.mx/YEAR/CODE.htm or https://historico.conaliteg.gob.mx/CODE.htm"
    )]
    UnrecognizedUrl {
        /// The URL that failed classification.
        url: String,
    },

    /// A current-catalog URL is missing its year path segment.
    #[error("could not extract the publication year from '{url}': expected a /YEAR/CODE.htm path")]
    YearMissing {
        /// The URL that was inspected.
        url: String,
    },

    /// A historical-catalog URL is missing its code path segment.
    #[error("could not extract the book code from '{url}': expected a /CODE.htm path")]
    CodeMissing {
        /// The URL that was inspected.
        url: String,
    },
}

impl CatalogError {
    /// Creates an `UnrecognizedUrl` error.
    #[must_use]
    pub fn unrecognized(url: &str) -> Self {
        Self::UnrecognizedUrl {
            url: url.to_string(),
        }
    }

    /// Creates a `YearMissing` error.
    #[must_use]
    pub fn year_missing(url: &str) -> Self {
        Self::YearMissing {
            url: url.to_string(),
        }
    }

    /// Creates a `CodeMissing` error.
    #[must_use]
    pub fn code_missing(url: &str) -> Self {
        Self::CodeMissing {
            url: url.to_string(),
        }
    }
}
