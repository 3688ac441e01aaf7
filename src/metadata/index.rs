//! Historical index (`claves.json`) record types and lookup.
//!
//! The historical catalog does not embed page counts in its viewer pages;
//! a single shared index maps every book code to its record.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::MetadataError;

/// One record of the historical index.
///
/// The live index spells its fields `ag_pages` / `ag_clave`; the aliases keep
/// both spellings parseable.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    /// Exact number of downloadable page images (no offset applies).
    #[serde(alias = "ag_pages")]
    pub pages: u32,
    /// The book code, repeated inside the record.
    #[serde(default, alias = "ag_clave")]
    pub code: String,
}

/// The full historical index, keyed by book code.
pub type HistoricalIndex = HashMap<String, IndexEntry>;

/// Looks up a book code in the index (exact, case-sensitive match).
pub(crate) fn lookup_page_count(
    index: &HistoricalIndex,
    code: &str,
) -> Result<u32, MetadataError> {
    index
        .get(code)
        .map(|entry| entry.pages)
        .ok_or_else(|| MetadataError::code_not_in_index(code))
}
