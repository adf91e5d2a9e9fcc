use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordinal impact classification. Used for filtering only; carries no numeric weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown impact level '{0}' (expected low, medium or high)")]
pub struct ParseImpactError(pub String);

impl FromStr for ImpactLevel {
    type Err = ParseImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ImpactLevel::Low),
            "medium" => Ok(ImpactLevel::Medium),
            "high" => Ok(ImpactLevel::High),
            _ => Err(ParseImpactError(s.to_string())),
        }
    }
}

/// One problem / action / result paragraph of a case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    pub label: String,
    pub text: String,
}

/// Display-only metric. Values are opaque strings ("40%", "2k users").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTags {
    #[serde(default)]
    pub stack: BTreeSet<String>,
    #[serde(default)]
    pub industry: BTreeSet<String>,
    pub year: i32,
    pub impact: ImpactLevel,
}

/// A catalog entry. `id` is the stable slug used as the deep-link key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub narrative: Vec<LabeledText>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    pub tags: ProjectTags,
}

impl ProjectRecord {
    /// Lower-cased `"{title} {summary}"`, the haystack for free-text search.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }
}

/// Audience profile. Featured ids sort ahead of everything else while the role is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub label: String,
    #[serde(default)]
    pub featured_project_ids: BTreeSet<String>,
}

impl RoleProfile {
    /// A role that features nothing; sorting degrades to recency only.
    pub fn unfeatured(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            featured_project_ids: BTreeSet::new(),
        }
    }

    pub fn is_featured(&self, project_id: &str) -> bool {
        self.featured_project_ids.contains(project_id)
    }
}
