//! Deterministic per-page image URL construction.

use super::{BookMetadata, CatalogEndpoints};

/// Fixed width of the zero-padded page index in image URLs.
///
/// The server always expects 3 digits, which caps addressable books at 999
/// pages. That is a property of the site, so the width deliberately does not
/// scale with the page count.
pub const PAGE_INDEX_WIDTH: usize = 3;

/// Builds the image URL for one page of a book.
///
/// Pure and deterministic: the same metadata and index always produce the
/// same URL string.
///
/// - Current: `<libros>/<year>/c/<code>/<NNN>.jpg`
/// - Historical: `<historico>/c/<code>/<NNN>.jpg`
#[must_use]
pub fn page_image_url(
    endpoints: &CatalogEndpoints,
    metadata: &BookMetadata,
    page_index: u32,
) -> String {
    let padded = format!("{page_index:0width$}", width = PAGE_INDEX_WIDTH);
    match metadata {
        BookMetadata::Current { code, year, .. } => {
            format!(
                "{}/{year}/c/{code}/{padded}.jpg",
                endpoints.libros_base_url()
            )
        }
        BookMetadata::Historical { code, .. } => {
            format!("{}/c/{code}/{padded}.jpg", endpoints.historico_base_url())
        }
    }
}
