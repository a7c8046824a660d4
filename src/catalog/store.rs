use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::catalog::source::{CatalogError, DocumentSource};
use crate::core::filter::{field_contains, ScoreFilter};
use crate::core::score::ScoreRecord;

/// The in-memory score catalog.
///
/// Holds every discovered record in traversal order plus a path index for
/// exact lookup. Immutable once built: queries are pure reads, and the
/// only way to pick up new documents is to build a fresh catalog.
#[derive(Debug)]
pub struct ScoreCatalog {
    /// All records, in the order the source yielded them.
    scores: Vec<ScoreRecord>,

    /// Index: path -> index in the scores vec. First record wins when a
    /// source yields a duplicate path.
    path_to_index: HashMap<String, usize>,

    /// When this catalog was built.
    loaded_at: DateTime<Utc>,
}

impl ScoreCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: Vec::new(),
            path_to_index: HashMap::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Build a catalog by fetching and parsing every document from a
    /// source.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the source fails; no partial catalog
    /// is produced.
    pub fn from_source(source: &dyn DocumentSource) -> Result<Self, CatalogError> {
        let documents = source.fetch_documents()?;

        let mut catalog = Self::new();
        catalog.scores.reserve(documents.len());
        for document in documents {
            catalog.add_score(ScoreRecord::from_document(
                &document.relative_path,
                document.content,
            ));
        }

        Ok(catalog)
    }

    /// Add a record to the catalog.
    pub fn add_score(&mut self, score: ScoreRecord) {
        self.path_to_index
            .entry(score.path.clone())
            .or_insert(self.scores.len());
        self.scores.push(score);
    }

    /// All records, in load order.
    #[must_use]
    pub fn all(&self) -> &[ScoreRecord] {
        &self.scores
    }

    /// Get a record by exact path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ScoreRecord> {
        self.path_to_index.get(path).map(|&idx| &self.scores[idx])
    }

    /// Records satisfying every criterion set on the filter, in load
    /// order. An empty filter returns the full catalog.
    #[must_use]
    pub fn filter(&self, filter: &ScoreFilter) -> Vec<&ScoreRecord> {
        self.scores.iter().filter(|s| filter.matches(s)).collect()
    }

    /// Distinct grouping names, lexicographically sorted.
    ///
    /// Includes every top-level `category` plus each `full_category` that
    /// differs from its record's `category`. Empty groupings (files at
    /// the document root) are skipped.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for score in &self.scores {
            if !score.category.is_empty() {
                names.insert(score.category.clone());
            }
            if score.full_category != score.category && !score.full_category.is_empty() {
                names.insert(score.full_category.clone());
            }
        }
        names.into_iter().collect()
    }

    /// Distinct non-empty composer names, lexicographically sorted.
    #[must_use]
    pub fn composers(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for score in &self.scores {
            if let Some(composer) = score.composer() {
                if !composer.is_empty() {
                    names.insert(composer.to_string());
                }
            }
        }
        names.into_iter().collect()
    }

    /// Records whose title contains `query`, case-insensitively. Records
    /// without a title are excluded.
    #[must_use]
    pub fn search_by_title(&self, query: &str) -> Vec<&ScoreRecord> {
        self.scores
            .iter()
            .filter(|s| field_contains(s.title(), query))
            .collect()
    }

    /// Records whose composer contains `query`, case-insensitively.
    /// Records without a composer are excluded.
    #[must_use]
    pub fn search_by_composer(&self, query: &str) -> Vec<&ScoreRecord> {
        self.scores
            .iter()
            .filter(|s| field_contains(s.composer(), query))
            .collect()
    }

    /// Number of records in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// When this catalog was built.
    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for ScoreCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::SourceDocument;

    /// In-memory source for exercising the catalog without a filesystem.
    struct StaticSource(Vec<SourceDocument>);

    impl DocumentSource for StaticSource {
        fn fetch_documents(&self) -> Result<Vec<SourceDocument>, CatalogError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static fixture".to_string()
        }
    }

    fn doc(path: &str, metadata: &str) -> SourceDocument {
        SourceDocument {
            relative_path: path.to_string(),
            content: format!("GABc dedB|\n---\n{metadata}---\n"),
        }
    }

    fn fixture() -> ScoreCatalog {
        let source = StaticSource(vec![
            doc(
                "classical/minuet-in-g.gen",
                "title: Minuet in G\ncomposer: Johann Sebastian Bach\ntime-signature: 3/4\n",
            ),
            doc(
                "classical/baroque/air.gen",
                "title: Air on the G String\ncomposer: Johann Sebastian Bach\n",
            ),
            doc(
                "ensemble/star-wars.gen",
                "title: Star Wars Theme\ncomposer: John Williams\ntime-signature: 4/4\n",
            ),
            doc("folk/untitled.gen", ""),
        ]);
        ScoreCatalog::from_source(&source).unwrap()
    }

    #[test]
    fn test_from_source_preserves_order() {
        let catalog = fixture();
        assert_eq!(catalog.len(), 4);

        let paths: Vec<&str> = catalog.all().iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "classical/minuet-in-g.gen",
                "classical/baroque/air.gen",
                "ensemble/star-wars.gen",
                "folk/untitled.gen",
            ]
        );
    }

    #[test]
    fn test_get_by_exact_path() {
        let catalog = fixture();

        let score = catalog.get("ensemble/star-wars.gen").unwrap();
        assert_eq!(score.title(), Some("Star Wars Theme"));

        assert!(catalog.get("ensemble/star-wars").is_none());
        assert!(catalog.get("missing/score.gen").is_none());
    }

    #[test]
    fn test_duplicate_paths_keep_first_record() {
        let source = StaticSource(vec![
            doc("dup/score.gen", "title: First\n"),
            doc("dup/score.gen", "title: Second\n"),
        ]);
        let catalog = ScoreCatalog::from_source(&source).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("dup/score.gen").unwrap().title(), Some("First"));
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = fixture();
        let results = catalog.filter(&ScoreFilter::default());

        assert_eq!(results.len(), catalog.len());
        assert_eq!(results[0].path, "classical/minuet-in-g.gen");
    }

    #[test]
    fn test_filter_by_composer_substring() {
        let catalog = fixture();
        let results = catalog.filter(&ScoreFilter {
            composer: Some("bach".to_string()),
            ..Default::default()
        });

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|s| s.composer()
            == Some("Johann Sebastian Bach")));
    }

    #[test]
    fn test_filter_by_category_matches_either_grouping() {
        let catalog = fixture();

        let top = catalog.filter(&ScoreFilter {
            category: Some("classical".to_string()),
            ..Default::default()
        });
        let paths: Vec<&str> = top.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["classical/minuet-in-g.gen", "classical/baroque/air.gen"]
        );

        let nested = catalog.filter(&ScoreFilter {
            category: Some("classical/baroque".to_string()),
            ..Default::default()
        });
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].path, "classical/baroque/air.gen");
    }

    #[test]
    fn test_filter_combines_criteria() {
        let catalog = fixture();
        let results = catalog.filter(&ScoreFilter {
            composer: Some("bach".to_string()),
            time_signature: Some("3/4".to_string()),
            ..Default::default()
        });

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "classical/minuet-in-g.gen");
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let catalog = fixture();
        assert_eq!(
            catalog.categories(),
            vec!["classical", "classical/baroque", "ensemble", "folk"]
        );
    }

    #[test]
    fn test_composers_sorted_distinct_non_empty() {
        let catalog = fixture();
        assert_eq!(
            catalog.composers(),
            vec!["Johann Sebastian Bach", "John Williams"]
        );
    }

    #[test]
    fn test_search_by_title() {
        let catalog = fixture();

        let results = catalog.search_by_title("star");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "ensemble/star-wars.gen");

        assert!(catalog.search_by_title("nocturne").is_empty());
    }

    #[test]
    fn test_search_by_composer_excludes_untitled() {
        let catalog = fixture();

        let results = catalog.search_by_composer("john");
        // "Johann Sebastian Bach" and "John Williams" both contain "john"
        // case-insensitively; the record with no composer never errors.
        assert_eq!(results.len(), 3);
    }
}
