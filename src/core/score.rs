use std::collections::BTreeMap;

use serde::Serialize;

use crate::parsing::document::parse;

/// A notation document discovered in the catalog.
///
/// Records are immutable after construction: the parser output and the
/// path-derived groupings are computed once when the document is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Slash-joined path relative to the document root. Unique within a
    /// loaded catalog and used as the primary key.
    pub path: String,

    /// Final path segment.
    pub filename: String,

    /// First path segment, the top-level grouping.
    pub category: String,

    /// All path segments except the filename, slash-joined. Equals
    /// `category` for files one level deep; empty for files directly at
    /// the document root.
    pub full_category: String,

    /// Full original file text, byte for byte as read.
    pub content: String,

    /// Notation body extracted by the parser, trimmed. Never contains the
    /// metadata block.
    pub notation: String,

    /// Metadata fields with camelCase keys and stringified values. Empty
    /// (never absent) when the document has no valid block.
    pub metadata: BTreeMap<String, String>,
}

impl ScoreRecord {
    /// Build a record from a document's relative path and full text.
    #[must_use]
    pub fn from_document(relative_path: &str, content: String) -> Self {
        let parsed = parse(&content);

        let (full_category, filename) = match relative_path.rsplit_once('/') {
            Some((dirs, file)) => (dirs.to_string(), file.to_string()),
            None => (String::new(), relative_path.to_string()),
        };
        let category = relative_path
            .split('/')
            .next()
            .unwrap_or(relative_path)
            .to_string();

        Self {
            path: relative_path.to_string(),
            filename,
            category,
            full_category,
            content,
            notation: parsed.notation,
            metadata: parsed.metadata,
        }
    }

    /// Title from metadata, when present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    /// Composer from metadata, when present.
    #[must_use]
    pub fn composer(&self) -> Option<&str> {
        self.field("composer")
    }

    /// Time signature from metadata, when present.
    #[must_use]
    pub fn time_signature(&self) -> Option<&str> {
        self.field("timeSignature")
    }

    /// Tempo from metadata, when present.
    #[must_use]
    pub fn tempo(&self) -> Option<&str> {
        self.field("tempo")
    }

    /// Key signature from metadata, when present.
    #[must_use]
    pub fn key_signature(&self) -> Option<&str> {
        self.field("keySignature")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}
