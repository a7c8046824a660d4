//! # scorebook
//!
//! A library for cataloging and querying plain-text music notation
//! documents.
//!
//! A score file holds two segments: an opaque notation body, then a
//! trailing metadata block delimited by a pair of `---` lines and
//! encoded as a flat YAML mapping (`title`, `composer`,
//! `time-signature`, ...). scorebook discovers every such file under a
//! document root, parses each one into a [`ScoreRecord`], and serves
//! filter, lookup, enumeration, and substring-search queries from an
//! in-memory catalog that is built once on first access.
//!
//! ## Features
//!
//! - **Total parsing**: documents without a metadata block (or with a
//!   malformed one) are still cataloged with their full text as notation
//! - **Backward marker scan**: notation bodies may contain `---`
//!   separators without being mistaken for metadata
//! - **Lazy load-once cache**: one directory scan per process, even under
//!   concurrent first access; all queries are pure in-memory reads
//! - **Swappable storage**: the catalog depends only on the
//!   [`DocumentSource`] trait
//!
//! ## Example
//!
//! ```rust,no_run
//! use scorebook::{CatalogService, DirectorySource, ScoreFilter};
//!
//! let service = CatalogService::new(DirectorySource::new("scores", "gen"));
//! let catalog = service.catalog()?;
//!
//! for score in catalog.filter(&ScoreFilter {
//!     composer: Some("bach".to_string()),
//!     ..Default::default()
//! }) {
//!     println!("{}: {}", score.path, score.title().unwrap_or("(untitled)"));
//! }
//! # Ok::<(), scorebook::CatalogError>(())
//! ```
//!
//! ## Modules
//!
//! - [`parsing`]: Notation document parser
//! - [`core`]: Score records and filter criteria
//! - [`catalog`]: Document discovery, caching, and query evaluation
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON query API server

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::service::CatalogService;
pub use catalog::source::{CatalogError, DirectorySource, DocumentSource, SourceDocument};
pub use catalog::store::ScoreCatalog;
pub use core::filter::ScoreFilter;
pub use core::score::ScoreRecord;
pub use parsing::document::{parse, ParsedDocument};
