//! CONALITEG book downloader core library.
//!
//! Turns a public book-reader URL into a single PDF of the book's page
//! images, covering both CONALITEG host families (current and historical
//! catalogs).
//!
//! # Architecture
//!
//! The pipeline runs in three stages, leaves first:
//!
//! - [`catalog`] - URL classification, book identity types, and per-page
//!   image URL construction (pure)
//! - [`metadata`] - viewer-page scrape and historical index lookup
//! - [`assemble`] - the sequential fetch-and-append loop and PDF writing
//!
//! Data flow: URL → [`catalog::classify`] → [`metadata::MetadataClient`] →
//! [`assemble::Assembler`] → `<code>.pdf`.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assemble;
pub mod catalog;
pub mod http;
pub mod metadata;

// Re-export commonly used types
pub use assemble::{AssembleError, Assembler, BookPdf, Orientation};
pub use catalog::{
    BookMetadata, BookType, CatalogEndpoints, CatalogError, PAGE_INDEX_WIDTH, classify,
    page_image_url,
};
pub use metadata::{MetadataClient, MetadataError};
