//! Parser for notation documents with a trailing metadata block.
//!
//! A document is plain text in two segments: a notation body, then a
//! metadata block delimited by a pair of lines whose trimmed content is
//! exactly `---`. The block holds a flat YAML mapping of descriptive
//! fields (`title`, `composer`, `time-signature`, ...).
//!
//! The markers are located by scanning **backward** from the last line,
//! so a notation body that legitimately contains `---` separators is
//! never mistaken for metadata: only the last well-formed pair counts.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

/// Line that opens and closes a metadata block (after trimming).
const BLOCK_MARKER: &str = "---";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata block is not a key/value mapping")]
    NotAMapping,

    #[error("invalid YAML in metadata block: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result of splitting a document into its two segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Notation body with surrounding whitespace trimmed. Never contains
    /// the metadata block.
    pub notation: String,

    /// Decoded metadata fields, keys normalized to camelCase and values
    /// coerced to strings. Empty when the document has no valid block.
    pub metadata: BTreeMap<String, String>,
}

/// Split a document into notation body and metadata.
///
/// Total function: any input produces a `ParsedDocument`. A document with
/// fewer than two marker lines has no metadata and the entire (trimmed)
/// text becomes the notation. A block that fails to decode degrades to
/// empty metadata with a warning; the notation slice is unaffected.
#[must_use]
pub fn parse(text: &str) -> ParsedDocument {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some((start, end)) = find_block_markers(&lines) else {
        return ParsedDocument {
            notation: text.trim().to_string(),
            metadata: BTreeMap::new(),
        };
    };

    let notation = lines[..start].join("\n").trim().to_string();
    let block = lines[start + 1..end].join("\n");

    let metadata = match decode_metadata(&block) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Ignoring undecodable metadata block: {e}");
            BTreeMap::new()
        }
    };

    ParsedDocument { notation, metadata }
}

/// Locate the metadata block delimiters nearest the end of the document.
///
/// Scans backward: the first marker line found is the closing delimiter,
/// the next one continuing backward is the opening delimiter, so `start`
/// is strictly before `end` whenever a pair is returned. Returns the
/// `(start, end)` line indices, or `None` when no such pair exists.
fn find_block_markers(lines: &[&str]) -> Option<(usize, usize)> {
    let mut end = None;

    for (index, line) in lines.iter().enumerate().rev() {
        if line.trim() != BLOCK_MARKER {
            continue;
        }
        match end {
            None => end = Some(index),
            Some(end) => return Some((index, end)),
        }
    }

    None
}

/// Decode a metadata block into normalized key/value pairs.
///
/// An empty block decodes to YAML `null`, which normalizes to an empty
/// map. Scalar values of any type are coerced to their textual form.
///
/// # Errors
///
/// Returns `MetadataError::Yaml` when the block is not valid YAML, or
/// `MetadataError::NotAMapping` when it decodes to something other than
/// a mapping (or `null`).
pub fn decode_metadata(block: &str) -> Result<BTreeMap<String, String>, MetadataError> {
    let value: serde_yaml::Value = serde_yaml::from_str(block)?;

    match value {
        serde_yaml::Value::Null => Ok(BTreeMap::new()),
        serde_yaml::Value::Mapping(mapping) => {
            let mut metadata = BTreeMap::new();
            for (key, value) in &mapping {
                let key = camel_case_key(&scalar_to_string(key));
                metadata.insert(key, scalar_to_string(value));
            }
            Ok(metadata)
        }
        _ => Err(MetadataError::NotAMapping),
    }
}

/// Convert a hyphen-separated key to camelCase.
///
/// Each `-x` sequence (hyphen followed by a lowercase ASCII letter)
/// becomes the uppercase letter: `time-signature` → `timeSignature`.
/// Hyphens not followed by a lowercase letter are preserved.
#[must_use]
pub fn camel_case_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    result.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Render a YAML value as the string form the catalog stores.
///
/// Numbers and booleans render as their textual form. Nested values
/// (rare in practice) fall back to their YAML serialization.
fn scalar_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
