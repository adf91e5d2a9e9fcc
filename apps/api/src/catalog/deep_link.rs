//! Case-study deep links.
//!
//! `?case=<id>` selects a single record. `case_id` is an older alias that is only consulted
//! when `case` is absent. The first value wins when a key repeats. Values are compared to
//! record ids verbatim (no trimming, no case folding).

use std::collections::BTreeMap;

use crate::models::project::ProjectRecord;

pub const CASE_KEY: &str = "case";
pub const LEGACY_CASE_KEY: &str = "case_id";

/// Multi-valued navigation query parameters, values kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationQuery {
    params: BTreeMap<String, Vec<String>>,
}

impl NavigationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Self::new();
        for (key, value) in pairs {
            query.push(key, value);
        }
        query
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    #[cfg(test)]
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.params.remove(key)
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.first().map(String::as_str)
    }

    pub fn all(&self, key: &str) -> &[String] {
        self.params.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// The requested case-study id, if any. An empty value counts as no request.
    pub fn case_study_id(&self) -> Option<&str> {
        let key = if self.contains_key(CASE_KEY) {
            CASE_KEY
        } else {
            LEGACY_CASE_KEY
        };
        self.first(key).filter(|id| !id.is_empty())
    }
}

/// Outcome of a deep-link lookup. `NotFound` is an ordinary, user-visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepLink<'a> {
    Absent,
    Found(&'a ProjectRecord),
    NotFound(&'a str),
}

impl<'a> DeepLink<'a> {
    /// The resolved record, or `None` for both `Absent` and `NotFound`.
    pub fn record(&self) -> Option<&'a ProjectRecord> {
        match *self {
            DeepLink::Found(record) => Some(record),
            _ => None,
        }
    }
}

pub fn resolve_deep_link<'a>(
    catalog: &'a [ProjectRecord],
    query: &'a NavigationQuery,
) -> DeepLink<'a> {
    let Some(id) = query.case_study_id() else {
        return DeepLink::Absent;
    };
    match catalog.iter().find(|record| record.id == id) {
        Some(record) => DeepLink::Found(record),
        None => DeepLink::NotFound(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::project;

    fn catalog() -> Vec<ProjectRecord> {
        vec![project("vision", 2024), project("genomesage", 2025)]
    }

    #[test]
    fn test_case_key_resolves() {
        let catalog = catalog();
        let query = NavigationQuery::from_pairs([("case", "vision")]);
        let found = resolve_deep_link(&catalog, &query).record().unwrap();
        assert_eq!(found.id, "vision");
    }

    #[test]
    fn test_empty_query_is_absent() {
        let catalog = catalog();
        let query = NavigationQuery::new();
        assert_eq!(resolve_deep_link(&catalog, &query), DeepLink::Absent);
        assert!(resolve_deep_link(&catalog, &query).record().is_none());
    }

    #[test]
    fn test_unknown_id_is_not_found_not_error() {
        let catalog = catalog();
        let query = NavigationQuery::from_pairs([("case", "nonexistent")]);
        assert_eq!(
            resolve_deep_link(&catalog, &query),
            DeepLink::NotFound("nonexistent")
        );
        assert!(resolve_deep_link(&catalog, &query).record().is_none());
    }

    #[test]
    fn test_first_value_wins() {
        let catalog = catalog();
        let query = NavigationQuery::from_pairs([("case", "genomesage"), ("case", "vision")]);
        let found = resolve_deep_link(&catalog, &query).record().unwrap();
        assert_eq!(found.id, "genomesage");
    }

    #[test]
    fn test_legacy_alias_used_when_case_absent() {
        let catalog = catalog();
        let query = NavigationQuery::from_pairs([("case_id", "vision")]);
        let found = resolve_deep_link(&catalog, &query).record().unwrap();
        assert_eq!(found.id, "vision");
    }

    #[test]
    fn test_case_takes_precedence_over_alias() {
        let catalog = catalog();
        let query =
            NavigationQuery::from_pairs([("case_id", "vision"), ("case", "genomesage")]);
        let found = resolve_deep_link(&catalog, &query).record().unwrap();
        assert_eq!(found.id, "genomesage");
    }

    #[test]
    fn test_empty_case_value_does_not_fall_back_to_alias() {
        let catalog = catalog();
        let query = NavigationQuery::from_pairs([("case", ""), ("case_id", "vision")]);
        assert_eq!(resolve_deep_link(&catalog, &query), DeepLink::Absent);
    }

    #[test]
    fn test_value_not_trimmed() {
        let catalog = catalog();
        let query = NavigationQuery::from_pairs([("case", " vision")]);
        assert_eq!(resolve_deep_link(&catalog, &query), DeepLink::NotFound(" vision"));
    }

    #[test]
    fn test_other_keys_ignored() {
        let catalog = catalog();
        let query =
            NavigationQuery::from_pairs([("utm_source", "vision"), ("tab", "projects")]);
        assert_eq!(resolve_deep_link(&catalog, &query), DeepLink::Absent);
    }

    #[test]
    fn test_remove_clears_deep_link() {
        let catalog = catalog();
        let mut query = NavigationQuery::from_pairs([("case", "vision")]);
        assert!(resolve_deep_link(&catalog, &query).record().is_some());
        query.remove(CASE_KEY);
        assert!(resolve_deep_link(&catalog, &query).record().is_none());
    }
}
