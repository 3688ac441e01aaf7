//! Catalog URL classification and book identity types.
//!
//! CONALITEG serves books from two host families:
//!
//! - the **current** catalog, `https://libros.conaliteg.gob.mx/YEAR/CODE.htm`,
//!   whose viewer page embeds the page count and code as script assignments;
//! - the **historical** catalog, `https://historico.conaliteg.gob.mx/CODE.htm`,
//!   whose page count lives in a shared `claves.json` index.
//!
//! This module decides which family a URL belongs to ([`classify`]), extracts
//! the fields that live in the URL itself, and builds per-page image URLs
//! ([`page_image_url`]). Everything here is pure; network lookups live in
//! [`crate::metadata`].

mod error;
mod page_url;

pub use error::CatalogError;
pub use page_url::{PAGE_INDEX_WIDTH, page_image_url};

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Production base URL of the current catalog.
const DEFAULT_LIBROS_BASE_URL: &str = "https://libros.conaliteg.gob.mx";

/// Production base URL of the historical catalog.
const DEFAULT_HISTORICO_BASE_URL: &str = "https://historico.conaliteg.gob.mx";

/// Compiles a regex at static init; panics on invalid pattern.
#[allow(clippy::expect_used)]
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static catalog regex is valid")
}

/// Current-catalog book URL: `https://libros.conaliteg.gob.mx/YEAR/CODE.htm[l]`.
static CURRENT_BOOK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"https://libros\.conaliteg\.gob\.mx/(\d+)/\w+\.html?"));

/// Historical-catalog book URL: `https://historico.conaliteg.gob.mx/CODE.htm[l]`.
static HISTORICAL_BOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"https://historico\.conaliteg\.gob\.mx/([a-zA-Z0-9]+)\.html?")
});

/// Year path segment of a current-catalog URL.
///
/// Keyed on the path shape rather than the host so metadata extraction can be
/// exercised against local test servers; [`classify`] remains host-strict.
static YEAR_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"/(\d+)/\w+\.html?"));

/// Code path segment of a historical-catalog URL, tolerating the `#page/N`
/// fragment the viewer appends while browsing.
static CODE_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"/(\w+)\.html?(?:#page/\d+)?"));

/// Which catalog family a book URL belongs to.
///
/// Derived once per run by [`classify`] and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookType {
    /// Current catalog (`libros.` host); carries a publication year.
    Current,
    /// Historical catalog (`historico.` host); no year applies.
    Historical,
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Historical => write!(f, "historical"),
        }
    }
}

/// Identity of a book once classified and extracted.
///
/// The year exists only for current-catalog books, so the variant carries it
/// per branch instead of smuggling a sentinel through a shared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookMetadata {
    /// A current-catalog book.
    Current {
        /// Book code, e.g. `P1LPM`.
        code: String,
        /// Publication year taken from the URL path, e.g. `2023`.
        year: String,
        /// Number of downloadable page images.
        page_count: u32,
    },
    /// A historical-catalog book.
    Historical {
        /// Book code, e.g. `K1HIA`.
        code: String,
        /// Number of downloadable page images.
        page_count: u32,
    },
}

impl BookMetadata {
    /// The book code, present for both families.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Current { code, .. } | Self::Historical { code, .. } => code,
        }
    }

    /// The publication year, if the family carries one.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        match self {
            Self::Current { year, .. } => Some(year),
            Self::Historical { .. } => None,
        }
    }

    /// Number of downloadable page images.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        match self {
            Self::Current { page_count, .. } | Self::Historical { page_count, .. } => *page_count,
        }
    }
}

/// Determines which catalog family a book URL belongs to.
///
/// The historical pattern is checked first. Both patterns are substring
/// matches, so a trailing `#page/N` fragment does not defeat classification.
///
/// # Errors
///
/// Returns [`CatalogError::UnrecognizedUrl`] when the URL matches neither
/// catalog pattern.
pub fn classify(url: &str) -> Result<BookType, CatalogError> {
    if HISTORICAL_BOOK_RE.is_match(url) {
        debug!(url, "classified as historical catalog");
        return Ok(BookType::Historical);
    }
    if CURRENT_BOOK_RE.is_match(url) {
        debug!(url, "classified as current catalog");
        return Ok(BookType::Current);
    }
    Err(CatalogError::unrecognized(url))
}

/// Extracts the publication year from a current-catalog URL path.
///
/// # Errors
///
/// Returns [`CatalogError::YearMissing`] when the URL has no `/YEAR/CODE.htm`
/// path segment.
pub fn current_year_from_url(url: &str) -> Result<String, CatalogError> {
    YEAR_SEGMENT_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CatalogError::year_missing(url))
}

/// Extracts the book code from a historical-catalog URL path.
///
/// A `#page/N` fragment is tolerated and stripped.
///
/// # Errors
///
/// Returns [`CatalogError::CodeMissing`] when the URL has no `/CODE.htm`
/// path segment.
pub fn historical_code_from_url(url: &str) -> Result<String, CatalogError> {
    CODE_SEGMENT_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CatalogError::code_missing(url))
}

/// Base URLs of both catalog hosts.
///
/// Defaults to the production hosts; tests inject local mock servers through
/// [`CatalogEndpoints::with_base_urls`].
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    libros_base_url: String,
    historico_base_url: String,
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogEndpoints {
    /// Creates endpoints pointing at the production catalog hosts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_LIBROS_BASE_URL, DEFAULT_HISTORICO_BASE_URL)
    }

    /// Creates endpoints with custom base URLs (for testing with wiremock).
    ///
    /// Trailing slashes are stripped so joined URLs stay canonical.
    #[must_use]
    pub fn with_base_urls(
        libros_base_url: impl Into<String>,
        historico_base_url: impl Into<String>,
    ) -> Self {
        Self {
            libros_base_url: libros_base_url.into().trim_end_matches('/').to_string(),
            historico_base_url: historico_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of the current catalog.
    #[must_use]
    pub fn libros_base_url(&self) -> &str {
        &self.libros_base_url
    }

    /// Base URL of the historical catalog.
    #[must_use]
    pub fn historico_base_url(&self) -> &str {
        &self.historico_base_url
    }

    /// URL of the historical index mapping book codes to page counts.
    #[must_use]
    pub fn claves_index_url(&self) -> String {
        format!("{}/claves.json", self.historico_base_url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== Classification ====================

    #[test]
    fn test_classify_historical_url() {
        let ty = classify("https://historico.conaliteg.gob.mx/K1HIA.htm").unwrap();
        assert_eq!(ty, BookType::Historical);
    }

    #[test]
    fn test_classify_historical_url_html_extension() {
        let ty = classify("https://historico.conaliteg.gob.mx/K1HIA.html").unwrap();
        assert_eq!(ty, BookType::Historical);
    }

    #[test]
    fn test_classify_historical_url_with_fragment() {
        let ty = classify("https://historico.conaliteg.gob.mx/XYZ.htm#page/2").unwrap();
        assert_eq!(ty, BookType::Historical);
    }

    #[test]
    fn test_classify_current_url() {
        let ty = classify("https://libros.conaliteg.gob.mx/2023/P1LPM.htm").unwrap();
        assert_eq!(ty, BookType::Current);
    }

    #[test]
    fn test_classify_current_url_with_fragment() {
        let ty = classify("https://libros.conaliteg.gob.mx/2024/P1MLA.htm#page/255").unwrap();
        assert_eq!(ty, BookType::Current);
    }

    #[test]
    fn test_classify_rejects_unknown_host() {
        let result = classify("https://example.com/2023/P1LPM.htm");
        assert!(matches!(
            result,
            Err(CatalogError::UnrecognizedUrl { .. })
        ));
    }

    #[test]
    fn test_classify_rejects_current_url_without_year() {
        let result = classify("https://libros.conaliteg.gob.mx/P1LPM.htm");
        assert!(result.is_err(), "current catalog requires a year segment");
    }

    #[test]
    fn test_classify_rejects_plain_text() {
        assert!(classify("not a url at all").is_err());
    }

    #[test]
    fn test_classify_rejects_empty_string() {
        assert!(classify("").is_err());
    }

    // ==================== Year extraction ====================

    #[test]
    fn test_current_year_from_url() {
        let year = current_year_from_url("https://libros.conaliteg.gob.mx/2023/P1LPM.htm").unwrap();
        assert_eq!(year, "2023");
    }

    #[test]
    fn test_current_year_from_local_test_url() {
        // Path-shaped extraction keeps wiremock-backed metadata tests possible.
        let year = current_year_from_url("http://127.0.0.1:8080/2021/P3ESA.htm").unwrap();
        assert_eq!(year, "2021");
    }

    #[test]
    fn test_current_year_missing() {
        let result = current_year_from_url("https://historico.conaliteg.gob.mx/K1HIA.htm");
        assert!(matches!(result, Err(CatalogError::YearMissing { .. })));
    }

    // ==================== Code extraction ====================

    #[test]
    fn test_historical_code_from_url() {
        let code = historical_code_from_url("https://historico.conaliteg.gob.mx/K1HIA.htm").unwrap();
        assert_eq!(code, "K1HIA");
    }

    #[test]
    fn test_historical_code_strips_page_fragment() {
        let code =
            historical_code_from_url("https://historico.conaliteg.gob.mx/XYZ.htm#page/2").unwrap();
        assert_eq!(code, "XYZ");
    }

    #[test]
    fn test_historical_code_missing() {
        let result = historical_code_from_url("https://historico.conaliteg.gob.mx/");
        assert!(matches!(result, Err(CatalogError::CodeMissing { .. })));
    }

    // ==================== Metadata accessors ====================

    #[test]
    fn test_metadata_current_accessors() {
        let meta = BookMetadata::Current {
            code: "P1LPM".to_string(),
            year: "2023".to_string(),
            page_count: 10,
        };
        assert_eq!(meta.code(), "P1LPM");
        assert_eq!(meta.year(), Some("2023"));
        assert_eq!(meta.page_count(), 10);
    }

    #[test]
    fn test_metadata_historical_has_no_year() {
        let meta = BookMetadata::Historical {
            code: "XYZ".to_string(),
            page_count: 5,
        };
        assert_eq!(meta.code(), "XYZ");
        assert_eq!(meta.year(), None);
        assert_eq!(meta.page_count(), 5);
    }

    // ==================== Endpoints ====================

    #[test]
    fn test_endpoints_default_to_production_hosts() {
        let endpoints = CatalogEndpoints::new();
        assert_eq!(endpoints.libros_base_url(), "https://libros.conaliteg.gob.mx");
        assert_eq!(
            endpoints.historico_base_url(),
            "https://historico.conaliteg.gob.mx"
        );
    }

    #[test]
    fn test_endpoints_claves_index_url() {
        let endpoints = CatalogEndpoints::new();
        assert_eq!(
            endpoints.claves_index_url(),
            "https://historico.conaliteg.gob.mx/claves.json"
        );
    }

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let endpoints =
            CatalogEndpoints::with_base_urls("http://127.0.0.1:1234/", "http://127.0.0.1:5678/");
        assert_eq!(endpoints.claves_index_url(), "http://127.0.0.1:5678/claves.json");
    }
}
