use serde::Deserialize;

use crate::core::score::ScoreRecord;

/// Filter criteria for catalog queries.
///
/// Unset criteria impose no constraint; set criteria must all hold for a
/// record to match. `title` and `composer` are case-insensitive substring
/// tests, `category` is a case-insensitive exact match against either
/// grouping, and the three notation attributes are case-sensitive exact
/// matches. A record lacking a field fails any criterion set on it.
///
/// Deserializes directly from query-string parameters, so the same type
/// serves as the wire-level filter for the HTTP API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFilter {
    pub title: Option<String>,
    pub composer: Option<String>,
    pub category: Option<String>,
    pub time_signature: Option<String>,
    pub tempo: Option<String>,
    pub key_signature: Option<String>,
}

impl ScoreFilter {
    /// True when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.composer.is_none()
            && self.category.is_none()
            && self.time_signature.is_none()
            && self.tempo.is_none()
            && self.key_signature.is_none()
    }

    /// Evaluate every set criterion against a record.
    #[must_use]
    pub fn matches(&self, score: &ScoreRecord) -> bool {
        if let Some(title) = &self.title {
            if !field_contains(score.title(), title) {
                return false;
            }
        }

        if let Some(composer) = &self.composer {
            if !field_contains(score.composer(), composer) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !score.category.eq_ignore_ascii_case(category)
                && !score.full_category.eq_ignore_ascii_case(category)
            {
                return false;
            }
        }

        if let Some(time_signature) = &self.time_signature {
            if score.time_signature() != Some(time_signature.as_str()) {
                return false;
            }
        }

        if let Some(tempo) = &self.tempo {
            if score.tempo() != Some(tempo.as_str()) {
                return false;
            }
        }

        if let Some(key_signature) = &self.key_signature {
            if score.key_signature() != Some(key_signature.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Case-insensitive substring test against an optional field. Records
/// without the field never match.
pub(crate) fn field_contains(field: Option<&str>, query: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(&query.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(metadata: &str) -> ScoreRecord {
        ScoreRecord::from_document(
            "classical/baroque/minuet.gen",
            format!("GABc|\n---\n{metadata}---\n"),
        )
    }

    fn bach() -> ScoreRecord {
        score("title: Minuet in G\ncomposer: Johann Sebastian Bach\ntime-signature: 3/4\n")
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ScoreFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&bach()));
        assert!(filter.matches(&score("")));
    }

    #[test]
    fn test_composer_substring_case_insensitive() {
        let filter = ScoreFilter {
            composer: Some("bach".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&bach()));
        assert!(!filter.matches(&score("composer: Wolfgang Amadeus Mozart\n")));
    }

    #[test]
    fn test_missing_field_fails_set_criterion() {
        let filter = ScoreFilter {
            composer: Some("bach".to_string()),
            ..Default::default()
        };

        assert!(!filter.matches(&score("title: Anonymous Air\n")));
    }

    #[test]
    fn test_category_exact_match_against_either_grouping() {
        let by_top = ScoreFilter {
            category: Some("Classical".to_string()),
            ..Default::default()
        };
        let by_full = ScoreFilter {
            category: Some("classical/baroque".to_string()),
            ..Default::default()
        };
        let partial = ScoreFilter {
            category: Some("class".to_string()),
            ..Default::default()
        };

        assert!(by_top.matches(&bach()));
        assert!(by_full.matches(&bach()));
        assert!(!partial.matches(&bach()));
    }

    #[test]
    fn test_time_signature_exact_and_case_sensitive() {
        let exact = ScoreFilter {
            time_signature: Some("3/4".to_string()),
            ..Default::default()
        };
        let wrong = ScoreFilter {
            time_signature: Some("4/4".to_string()),
            ..Default::default()
        };

        assert!(exact.matches(&bach()));
        assert!(!wrong.matches(&bach()));

        let lower = ScoreFilter {
            key_signature: Some("g".to_string()),
            ..Default::default()
        };
        assert!(!lower.matches(&score("key-signature: G\n")));
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let filter = ScoreFilter {
            composer: Some("bach".to_string()),
            time_signature: Some("3/4".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&bach()));

        let conflicting = ScoreFilter {
            composer: Some("bach".to_string()),
            time_signature: Some("4/4".to_string()),
            ..Default::default()
        };
        assert!(!conflicting.matches(&bach()));
    }
}
