//! Keyword inclusion filter.

use crate::models::NormalizedRecord;

/// Keeps records whose title or description mentions at least one term.
///
/// Matching is a case-insensitive substring search on the normalized text.
/// A filter without terms keeps every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    terms: Vec<String>,
}

impl KeywordFilter {
    /// Build a filter; blank terms are ignored.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let title = record.title.to_lowercase();
        let description = record.description.to_lowercase();
        self.terms
            .iter()
            .any(|term| title.contains(term.as_str()) || description.contains(term.as_str()))
    }
}
