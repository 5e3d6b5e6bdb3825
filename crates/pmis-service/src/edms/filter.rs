//! Document filtering by selected folder and free-text query.

use pmis_entity::document::Document;

use super::path::{FolderFilter, FolderPath, resolve_filter};

/// A normalised free-text search query.
///
/// The raw input is trimmed and lower-cased once; a whitespace-only query
/// is empty and matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Normalise `raw`.
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// Whether the query imposes no restriction.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalised query text.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Whether `document` contains the query in its name, category,
    /// description or any of its tags.
    pub fn matches(&self, document: &Document) -> bool {
        if self.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.needle);

        hit(document.name.as_str())
            || hit(document.category.as_str())
            || document.tags.iter().any(|tag| hit(tag.as_str()))
            || document.description.as_deref().is_some_and(hit)
    }
}

/// Documents under the folder selected by `path` that match `query`.
///
/// The input is left untouched and its relative order is preserved.
pub fn apply_filter(documents: &[Document], path: &FolderPath, query: &str) -> Vec<Document> {
    filter_documents(documents, &resolve_filter(path), &SearchQuery::new(query))
}

/// Documents matching both a prepared folder filter and query.
pub fn filter_documents(
    documents: &[Document],
    folder: &FolderFilter,
    query: &SearchQuery,
) -> Vec<Document> {
    documents
        .iter()
        .filter(|doc| folder.matches(doc) && query.matches(doc))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edms::testing::{doc, scenario};
    use pmis_entity::document::{Discipline, Phase};

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    fn corpus() -> Vec<Document> {
        let mut docs = scenario();
        let mut report = doc("d3", "proj-2", Phase::Design, Discipline::Civil, "Geotech Report");
        report.category = "Civil Works".to_string();
        report.description = Some("Borehole logs for the northern abutment".to_string());
        docs.push(report);
        let mut pump = doc("d4", "proj-2", Phase::Closure, Discipline::Mechanical, "Pump datasheet");
        pump.tags.insert("As-Built".to_string());
        docs.push(pump);
        docs
    }

    #[test]
    fn test_root_with_empty_query_is_identity() {
        let docs = corpus();
        assert_eq!(apply_filter(&docs, &FolderPath::root(), ""), docs);
    }

    #[test]
    fn test_discipline_path_scenario() {
        let docs = scenario();
        let result = apply_filter(&docs, &FolderPath::from_id("proj-1-Design-Civil"), "");
        assert_eq!(ids(&result), vec!["d1"]);
    }

    #[test]
    fn test_query_scenarios() {
        let docs = scenario();
        assert_eq!(ids(&apply_filter(&docs, &FolderPath::root(), "wiring")), vec!["d2"]);
        assert!(apply_filter(&docs, &FolderPath::root(), "nonexistent-term").is_empty());
    }

    #[test]
    fn test_project_path_selects_exact_subset() {
        let docs = corpus();
        for project in ["proj-1", "proj-2"] {
            let result = apply_filter(&docs, &FolderPath::from_id(project), "");
            let expected: Vec<&str> = docs
                .iter()
                .filter(|d| d.project_id.as_str() == project)
                .map(|d| d.id.as_str())
                .collect();
            assert_eq!(ids(&result), expected);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let docs = corpus();
        let lower = apply_filter(&docs, &FolderPath::root(), "civil");
        let upper = apply_filter(&docs, &FolderPath::root(), "CIVIL");
        assert_eq!(lower, upper);
        assert_eq!(ids(&lower), vec!["d3"]);
    }

    #[test]
    fn test_idempotent() {
        let docs = corpus();
        let path = FolderPath::from_id("proj-2");
        let once = apply_filter(&docs, &path, "re");
        let twice = apply_filter(&once, &path, "re");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matches_tags_description_and_category() {
        let docs = corpus();
        let root = FolderPath::root();
        assert_eq!(ids(&apply_filter(&docs, &root, "structural")), vec!["d1"]);
        assert_eq!(ids(&apply_filter(&docs, &root, "as-built")), vec!["d4"]);
        assert_eq!(ids(&apply_filter(&docs, &root, "borehole")), vec!["d3"]);
        assert_eq!(ids(&apply_filter(&docs, &root, "works")), vec!["d3"]);
    }

    #[test]
    fn test_whitespace_query_is_trimmed() {
        let docs = corpus();
        assert_eq!(apply_filter(&docs, &FolderPath::root(), "   ").len(), docs.len());
        assert_eq!(
            ids(&apply_filter(&docs, &FolderPath::root(), "  wiring ")),
            vec!["d2"]
        );
    }

    #[test]
    fn test_path_and_query_are_and_composed() {
        let docs = corpus();
        let result = apply_filter(&docs, &FolderPath::from_id("proj-1"), "report");
        assert!(result.is_empty());
        let result = apply_filter(&docs, &FolderPath::from_id("proj-2-Design"), "report");
        assert_eq!(ids(&result), vec!["d3"]);
    }

    #[test]
    fn test_result_never_exceeds_input() {
        let docs = corpus();
        for id in ["all", "proj-1", "proj-2-Closure", "proj-9", "proj-1-Design-Civil"] {
            for query in ["", "a", "pump", "zzz"] {
                let result = apply_filter(&docs, &FolderPath::from_id(id), query);
                assert!(result.len() <= docs.len());
            }
        }
    }
}
