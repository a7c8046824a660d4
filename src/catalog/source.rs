use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to scan document root: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("Failed to read document '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// One document yielded by a source: its slash-joined relative path and
/// its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub relative_path: String,
    pub content: String,
}

/// Where the catalog gets its documents.
///
/// This is the catalog's only storage dependency: an implementation yields
/// every recognized document under some root as relative path plus full
/// text. Swapping the implementation (archive, remote blob store, test
/// fixture) leaves the catalog contract untouched.
pub trait DocumentSource: Send + Sync {
    /// Fetch every document, in a stable traversal order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the root cannot be traversed or any
    /// document cannot be read. A failed fetch yields no partial result.
    fn fetch_documents(&self) -> Result<Vec<SourceDocument>, CatalogError>;

    /// Human-readable description of the source, for logs and status
    /// output.
    fn describe(&self) -> String;
}

/// Filesystem-backed source: recursively walks a document root and yields
/// every file with the recognized extension.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Create a source over `root` recognizing files with `extension`
    /// (with or without a leading dot).
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let extension = extension.strip_prefix('.').unwrap_or(&extension).to_string();

        Self {
            root: root.into(),
            extension,
        }
    }

    fn recognizes(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

impl DocumentSource for DirectorySource {
    fn fetch_documents(&self) -> Result<Vec<SourceDocument>, CatalogError> {
        let mut documents = Vec::new();

        // Siblings are visited in file-name order so the traversal (and
        // with it the catalog order) is deterministic across platforms.
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.recognizes(entry.path()) {
                continue;
            }

            let path = entry.path();
            let content =
                std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
                    path: path.display().to_string(),
                    source,
                })?;

            let relative_path = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            debug!("Discovered document {relative_path}");
            documents.push(SourceDocument {
                relative_path,
                content,
            });
        }

        Ok(documents)
    }

    fn describe(&self) -> String {
        format!("{} (*.{})", self.root.display(), self.extension)
    }
}
