use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::catalog::source::{CatalogError, DocumentSource};
use crate::catalog::store::ScoreCatalog;

/// Lazily-loaded, process-lifetime catalog cache.
///
/// The cache has three states: uninitialized (`None` in the slot),
/// loading (the slot's mutex is held while the scan runs), and ready
/// (`Some` in the slot). Concurrent first callers serialize on the mutex,
/// so at most one scan of the underlying source ever happens; everyone
/// observes the same catalog. Once ready, callers share an
/// `Arc<ScoreCatalog>` and queries never touch storage again.
///
/// A failed load leaves the cache uninitialized, so the next call retries
/// the full scan from scratch. There is no staleness check and no
/// incremental update: picking up new documents means building a new
/// service.
pub struct CatalogService {
    source: Box<dyn DocumentSource>,
    cache: Mutex<Option<Arc<ScoreCatalog>>>,
}

impl CatalogService {
    /// Create a service over a document source. No I/O happens until the
    /// first query.
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(None),
        }
    }

    /// Get the catalog, loading it on first access.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the underlying source fails; no
    /// partial catalog is published and a later call retries.
    pub fn catalog(&self) -> Result<Arc<ScoreCatalog>, CatalogError> {
        // A poisoned lock means a previous loader panicked before
        // publishing anything; the slot is still consistent (None), so
        // recover and retry the load.
        let mut slot = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        debug!("Loading score catalog from {}", self.source.describe());
        let catalog = Arc::new(ScoreCatalog::from_source(self.source.as_ref())?);
        info!(
            "Loaded score catalog: {} scores from {}",
            catalog.len(),
            self.source.describe()
        );

        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Human-readable description of the underlying source.
    #[must_use]
    pub fn describe_source(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::SourceDocument;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts how many times it is fetched. The counter is
    /// shared so tests can observe it after the source moves into the
    /// service.
    struct CountingSource {
        fetches: Arc<AtomicUsize>,
        fail_first: bool,
    }

    impl CountingSource {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let fetches = Arc::new(AtomicUsize::new(0));
            let source = Self {
                fetches: Arc::clone(&fetches),
                fail_first: false,
            };
            (source, fetches)
        }

        fn failing_once() -> Self {
            Self {
                fetches: Arc::new(AtomicUsize::new(0)),
                fail_first: true,
            }
        }
    }

    impl DocumentSource for CountingSource {
        fn fetch_documents(&self) -> Result<Vec<SourceDocument>, CatalogError> {
            let fetch = self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && fetch == 0 {
                return Err(CatalogError::Read {
                    path: "flaky/score.gen".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "transient"),
                });
            }

            Ok(vec![SourceDocument {
                relative_path: "classical/minuet.gen".to_string(),
                content: "GABc|\n---\ntitle: Minuet\n---\n".to_string(),
            }])
        }

        fn describe(&self) -> String {
            "counting fixture".to_string()
        }
    }

    #[test]
    fn test_second_access_served_from_cache() {
        let (source, fetches) = CountingSource::new();
        let service = CatalogService::new(source);

        let first = service.catalog().unwrap();
        let second = service.catalog().unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_access_scans_once() {
        let (source, fetches) = CountingSource::new();
        let service = Arc::new(CatalogService::new(source));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.catalog().unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_publishes_nothing_and_retries() {
        let service = CatalogService::new(CountingSource::failing_once());

        assert!(service.catalog().is_err());

        let catalog = service.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("classical/minuet.gen").unwrap().title(), Some("Minuet"));
    }
}
