//! Document assembly: the sequential fetch-and-append loop.
//!
//! [`Assembler`] walks a book's page indices in order, downloads each page
//! image, and appends it to a [`BookPdf`]. The loop is deliberately
//! sequential and fail-fast: the first failure aborts the run and no partial
//! PDF is ever written.

mod error;
mod pdf;

pub use error::AssembleError;
pub use pdf::BookPdf;

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use printpdf::Mm;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::catalog::{BookMetadata, CatalogEndpoints, page_image_url};
use crate::http::build_http_client;

/// Page canvas orientation, chosen by the user before any download starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// A4 portrait, 210 × 297 mm. The default.
    Portrait,
    /// A4 landscape, 297 × 210 mm.
    Landscape,
}

impl Orientation {
    /// Canvas dimensions (width, height).
    #[must_use]
    pub(crate) fn page_size(self) -> (Mm, Mm) {
        match self {
            Self::Portrait => (Mm(210.0), Mm(297.0)),
            Self::Landscape => (Mm(297.0), Mm(210.0)),
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    /// Parses the single-letter orientation choice: `v` (vertical/portrait)
    /// or `h` (horizontal/landscape).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v" => Ok(Self::Portrait),
            "h" => Ok(Self::Landscape),
            other => Err(format!("orientation must be 'v' or 'h', got '{other}'")),
        }
    }
}

/// Downloads a book's page images and assembles them into one PDF.
#[derive(Debug, Clone)]
pub struct Assembler {
    client: Client,
    endpoints: CatalogEndpoints,
    show_progress: bool,
}

impl Assembler {
    /// Creates an assembler pointing at the production catalog hosts.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::ClientBuild`] when HTTP client construction
    /// fails.
    pub fn new() -> Result<Self, AssembleError> {
        Self::with_endpoints(CatalogEndpoints::new())
    }

    /// Creates an assembler with custom endpoints (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::ClientBuild`] when HTTP client construction
    /// fails.
    pub fn with_endpoints(endpoints: CatalogEndpoints) -> Result<Self, AssembleError> {
        let client = build_http_client().map_err(|source| AssembleError::ClientBuild { source })?;
        Ok(Self::from_parts(client, endpoints))
    }

    /// Creates an assembler from an already-built HTTP client.
    #[must_use]
    pub fn from_parts(client: Client, endpoints: CatalogEndpoints) -> Self {
        Self {
            client,
            endpoints,
            show_progress: true,
        }
    }

    /// Enables or disables the per-page progress bar (on by default).
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Downloads every page image of `metadata` in ascending order and writes
    /// `<output_dir>/<code>.pdf`.
    ///
    /// Fail-fast: the first download or decode failure aborts the run before
    /// anything is written, discarding pages fetched so far.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError`] on any page fetch failure, undecodable image
    /// bytes, or final serialization failure.
    #[instrument(skip(self, metadata), fields(code = metadata.code(), pages = metadata.page_count()))]
    pub async fn assemble(
        &self,
        metadata: &BookMetadata,
        orientation: Orientation,
        output_dir: &Path,
    ) -> Result<PathBuf, AssembleError> {
        let total = metadata.page_count();
        let mut book = BookPdf::new(metadata.code(), orientation);

        let bar = if self.show_progress {
            ProgressBar::new(u64::from(total))
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template("[{pos}/{len}] {bar:40} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for page_index in 0..total {
            let url = page_image_url(&self.endpoints, metadata, page_index);
            bar.set_message(format!("page {}", page_index + 1));
            debug!(url, page = page_index + 1, total, "downloading page image");

            let bytes = self.fetch_image(&url).await?;
            book.append_page_image(&bytes, &url)?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        let output_path = output_dir.join(format!("{}.pdf", metadata.code()));
        book.save(&output_path)?;
        info!(path = %output_path.display(), pages = total, "book assembled");
        Ok(output_path)
    }

    /// GETs one page image, treating failure statuses as errors.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, AssembleError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| AssembleError::network(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssembleError::http_status(url, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| AssembleError::network(url, source))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_orientation_from_str_vertical() {
        assert_eq!(Orientation::from_str("v").unwrap(), Orientation::Portrait);
    }

    #[test]
    fn test_orientation_from_str_horizontal() {
        assert_eq!(Orientation::from_str("h").unwrap(), Orientation::Landscape);
    }

    #[test]
    fn test_orientation_rejects_other_values() {
        for value in ["x", "V", "H", "vertical", ""] {
            assert!(Orientation::from_str(value).is_err(), "should reject '{value}'");
        }
    }

    #[test]
    fn test_page_size_portrait() {
        let (w, h) = Orientation::Portrait.page_size();
        assert_eq!((w.0, h.0), (210.0, 297.0));
    }

    #[test]
    fn test_page_size_landscape() {
        let (w, h) = Orientation::Landscape.page_size();
        assert_eq!((w.0, h.0), (297.0, 210.0));
    }
}
