//! Book metadata extraction.
//!
//! Given a classified book URL, [`MetadataClient`] retrieves the book's code
//! and page count (and, for current-catalog books, the publication year):
//!
//! - **Current** books embed `ag_pages` / `ag_clave` in the viewer page; the
//!   year lives in the URL path. The raw page count includes two
//!   non-downloadable front/back-matter indices that are subtracted here.
//! - **Historical** books carry their code in the URL; the page count comes
//!   from the shared `claves.json` index, already exact.

mod error;
mod index;
mod viewer;

pub use error::MetadataError;
pub use index::{HistoricalIndex, IndexEntry};

use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::catalog::{
    BookMetadata, BookType, CatalogEndpoints, current_year_from_url, historical_code_from_url,
};
use crate::http::build_http_client;

/// Retrieves and parses book metadata from the catalog hosts.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: Client,
    endpoints: CatalogEndpoints,
}

impl MetadataClient {
    /// Creates a client pointing at the production catalog hosts.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ClientBuild`] when HTTP client construction
    /// fails.
    pub fn new() -> Result<Self, MetadataError> {
        Self::with_endpoints(CatalogEndpoints::new())
    }

    /// Creates a client with custom endpoints (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ClientBuild`] when HTTP client construction
    /// fails.
    pub fn with_endpoints(endpoints: CatalogEndpoints) -> Result<Self, MetadataError> {
        let client = build_http_client().map_err(|source| MetadataError::ClientBuild { source })?;
        Ok(Self::from_parts(client, endpoints))
    }

    /// Creates a client from an already-built HTTP client.
    ///
    /// Lets the binary share one connection pool between metadata extraction
    /// and page downloads.
    #[must_use]
    pub fn from_parts(client: Client, endpoints: CatalogEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Extracts the book's identity for its catalog family.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] on network failure, failure status, missing
    /// embedded markers, a malformed index, or an unknown historical code.
    #[instrument(skip(self))]
    pub async fn extract(
        &self,
        url: &str,
        book_type: BookType,
    ) -> Result<BookMetadata, MetadataError> {
        let metadata = match book_type {
            BookType::Current => self.extract_current(url).await?,
            BookType::Historical => self.extract_historical(url).await?,
        };
        info!(
            code = metadata.code(),
            year = metadata.year().unwrap_or("n/a"),
            pages = metadata.page_count(),
            "book metadata extracted"
        );
        Ok(metadata)
    }

    /// Current catalog: scrape the viewer page, take the year from the URL.
    async fn extract_current(&self, url: &str) -> Result<BookMetadata, MetadataError> {
        let body = self.fetch_text(url).await?;
        let markers = viewer::parse_viewer_markers(&body, url)?;
        let year = current_year_from_url(url)?;
        Ok(BookMetadata::Current {
            page_count: markers.page_count(),
            code: markers.code,
            year,
        })
    }

    /// Historical catalog: code from the URL, page count from the index.
    async fn extract_historical(&self, url: &str) -> Result<BookMetadata, MetadataError> {
        let code = historical_code_from_url(url)?;
        let page_count = self.resolve_page_count(&code).await?;
        Ok(BookMetadata::Historical { code, page_count })
    }

    /// Resolves a historical book's page count from `claves.json`.
    ///
    /// No offset is applied; the index stores the exact count.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] on fetch failure, an index body that is not
    /// the expected mapping, or an absent code.
    #[instrument(skip(self))]
    pub async fn resolve_page_count(&self, code: &str) -> Result<u32, MetadataError> {
        let index_url = self.endpoints.claves_index_url();
        let body = self.fetch_text(&index_url).await?;
        let index: HistoricalIndex = serde_json::from_str(&body)
            .map_err(|source| MetadataError::index_decode(&index_url, source))?;
        debug!(entries = index.len(), "historical index fetched");
        index::lookup_page_count(&index, code)
    }

    /// GETs a URL and returns its body as text, treating failure statuses as
    /// errors.
    async fn fetch_text(&self, url: &str) -> Result<String, MetadataError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| MetadataError::network(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::http_status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|source| MetadataError::network(url, source))
    }
}
