//! Extraction of embedded markers from a current-catalog viewer page.
//!
//! The viewer embeds the book identity as plain script assignments:
//!
//! ```text
//! ag_pages = 42;
//! ag_clave = "P1LPM";
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::error::MetadataError;

/// The viewer's `ag_pages` value counts two indices (front/back matter) that
/// are never served as page images. The raw count is reduced by this offset
/// on the current-catalog path only; the historical index already stores the
/// exact count.
pub(crate) const VIEWER_PAGE_OFFSET: u32 = 2;

#[allow(clippy::expect_used)]
static AG_PAGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ag_pages = (\d+);").expect("static marker regex is valid"));

#[allow(clippy::expect_used)]
static AG_CLAVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"ag_clave = "(\w+)";"#).expect("static marker regex is valid"));

/// Markers lifted verbatim from a viewer page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ViewerMarkers {
    /// The book code from `ag_clave`.
    pub code: String,
    /// The raw `ag_pages` value, before the front/back-matter offset.
    pub raw_page_count: u32,
}

impl ViewerMarkers {
    /// The number of downloadable page images this viewer page describes.
    pub fn page_count(&self) -> u32 {
        self.raw_page_count.saturating_sub(VIEWER_PAGE_OFFSET)
    }
}

/// Locates both embedded markers in a viewer page body.
///
/// `url` is only used for error context.
pub(crate) fn parse_viewer_markers(body: &str, url: &str) -> Result<ViewerMarkers, MetadataError> {
    let raw_pages = AG_PAGES_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| MetadataError::marker_missing("ag_pages", url))?;

    let raw_page_count: u32 = raw_pages
        .parse()
        .map_err(|_| MetadataError::InvalidPageCount {
            value: raw_pages.to_string(),
            url: url.to_string(),
        })?;

    let code = AG_CLAVE_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| MetadataError::marker_missing("ag_clave", url))?;

    Ok(ViewerMarkers {
        code,
        raw_page_count,
    })
}
