//! Score catalog: document discovery, caching, and query evaluation.
//!
//! The catalog is built lazily on first access: the document source is
//! traversed once, every recognized file is parsed into a
//! [`ScoreRecord`], and the resulting list is cached in memory for the
//! rest of the process. All queries (filter, exact lookup, grouping and
//! composer enumeration, substring search) are evaluated against the
//! cached list and never touch storage again.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scorebook::catalog::service::CatalogService;
//! use scorebook::catalog::source::DirectorySource;
//! use scorebook::core::filter::ScoreFilter;
//!
//! let service = CatalogService::new(DirectorySource::new("scores", "gen"));
//!
//! // First query triggers the scan; later queries reuse the cache.
//! let catalog = service.catalog()?;
//! let bach = catalog.filter(&ScoreFilter {
//!     composer: Some("bach".to_string()),
//!     ..Default::default()
//! });
//! for score in bach {
//!     println!("{}", score.path);
//! }
//! # Ok::<(), scorebook::catalog::source::CatalogError>(())
//! ```
//!
//! [`ScoreRecord`]: crate::core::score::ScoreRecord

pub mod service;
pub mod source;
pub mod store;
