//! Parser for the notation document format.
//!
//! A score file is plain text in two segments:
//!
//! 1. The **notation body**: opaque text the catalog never interprets.
//! 2. A trailing **metadata block**: a flat YAML mapping delimited by a
//!    pair of `---` lines, holding fields like `title`, `composer`,
//!    `time-signature`, `tempo`, and `key-signature`.
//!
//! ## Example
//!
//! ```rust
//! use scorebook::parsing::document::parse;
//!
//! let text = "GABc dedB|dedB dedB|\n---\ntitle: Minuet in G\ntime-signature: 3/4\n---\n";
//! let parsed = parse(text);
//!
//! assert_eq!(parsed.notation, "GABc dedB|dedB dedB|");
//! assert_eq!(parsed.metadata["timeSignature"], "3/4");
//! ```
//!
//! Hyphen-separated keys are normalized to camelCase (`time-signature`
//! becomes `timeSignature`) and values of any scalar type are stored as
//! strings. Parsing is total: a document without a valid block simply has
//! empty metadata.

pub mod document;
