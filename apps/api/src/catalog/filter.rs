//! Multi-criteria project filtering and role-aware ordering.
//!
//! Algorithm:
//! 1. Keep a record iff every non-empty dimension matches (AND across dimensions).
//!    Within a tag dimension one shared element suffices (set intersection, not subset).
//! 2. Stable sort by `(priority, -year)` where featured records get priority 0.
//!    Records with identical keys keep catalog declaration order.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::models::project::{ImpactLevel, ProjectRecord, RoleProfile};

/// Resolved filter widget values for one render. Empty dimensions do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub stack: BTreeSet<String>,
    pub industry: BTreeSet<String>,
    pub impact: BTreeSet<ImpactLevel>,
    /// Trimmed and lower-cased.
    query: String,
}

impl FilterCriteria {
    pub fn new(
        stack: BTreeSet<String>,
        industry: BTreeSet<String>,
        impact: BTreeSet<ImpactLevel>,
        query: &str,
    ) -> Self {
        Self {
            stack,
            industry,
            impact,
            query: query.trim().to_lowercase(),
        }
    }

    #[cfg(test)]
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim().to_lowercase();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_unconstrained(&self) -> bool {
        self.stack.is_empty()
            && self.industry.is_empty()
            && self.impact.is_empty()
            && self.query.is_empty()
    }
}

pub fn matches(record: &ProjectRecord, criteria: &FilterCriteria) -> bool {
    let tags = &record.tags;

    if !criteria.stack.is_empty() && criteria.stack.is_disjoint(&tags.stack) {
        return false;
    }
    if !criteria.industry.is_empty() && criteria.industry.is_disjoint(&tags.industry) {
        return false;
    }
    if !criteria.impact.is_empty() && !criteria.impact.contains(&tags.impact) {
        return false;
    }
    criteria.query.is_empty() || record.search_text().contains(&criteria.query)
}

/// Filters `catalog` by `criteria` and orders the survivors for `role`.
///
/// Returns references into `catalog`; an empty vector means "no matches" and is not a failure.
pub fn filter_and_sort<'a>(
    catalog: &'a [ProjectRecord],
    criteria: &FilterCriteria,
    role: &RoleProfile,
) -> Vec<&'a ProjectRecord> {
    let mut visible: Vec<&ProjectRecord> = catalog
        .iter()
        .filter(|record| matches(record, criteria))
        .collect();

    // `sort_by_key` is stable, which the declaration-order tie-break relies on.
    visible.sort_by_key(|record| {
        let priority = u8::from(!role.is_featured(&record.id));
        (priority, Reverse(record.tags.year))
    });

    visible
}
