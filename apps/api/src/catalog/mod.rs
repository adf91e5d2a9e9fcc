//! Project catalog — load-once reference data plus the pure view operations over it.
//!
//! The catalog is parsed and validated at startup, then shared read-only behind an `Arc`.
//! Nothing in this module tree mutates a record after load.

pub mod deep_link;
pub mod filter;
pub mod handlers;
pub mod view;

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::project::{ImpactLevel, ProjectRecord, RoleProfile};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Project at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate project id '{0}'")]
    DuplicateId(String),

    #[error("Duplicate role label '{0}'")]
    DuplicateRole(String),
}

/// Option lists for the filter widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFacets {
    pub stack: Vec<String>,
    pub industry: Vec<String>,
    pub impact: Vec<ImpactLevel>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogDocument {
    projects: Vec<ProjectRecord>,
    #[serde(default)]
    roles: Vec<RoleProfile>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
    roles: Vec<RoleProfile>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty or duplicate ids and duplicate role labels.
    pub fn new(
        projects: Vec<ProjectRecord>,
        roles: Vec<RoleProfile>,
    ) -> Result<Self, CatalogError> {
        let mut seen_ids = HashSet::new();
        for (position, project) in projects.iter().enumerate() {
            if project.id.is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen_ids.insert(project.id.as_str()) {
                return Err(CatalogError::DuplicateId(project.id.clone()));
            }
        }

        let mut seen_labels = HashSet::new();
        for role in &roles {
            if !seen_labels.insert(role.label.as_str()) {
                return Err(CatalogError::DuplicateRole(role.label.clone()));
            }
            // A dangling id never matches; worth a log line, not a failed boot.
            for featured in &role.featured_project_ids {
                if !seen_ids.contains(featured.as_str()) {
                    warn!(
                        role = %role.label,
                        project_id = %featured,
                        "Featured project id does not exist in catalog"
                    );
                }
            }
        }

        Ok(Self { projects, roles })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::new(document.projects, document.roles)
    }

    /// Reads and validates a JSON catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            "Catalog loaded from {}: {} projects, {} roles",
            path.display(),
            catalog.projects.len(),
            catalog.roles.len()
        );
        Ok(catalog)
    }

    /// Projects in declaration order. Declaration order is the final sort tie-break.
    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Looks up a role by exact label. Unknown or absent labels degrade to a role
    /// that features nothing.
    pub fn resolve_role(&self, label: Option<&str>) -> Cow<'_, RoleProfile> {
        let Some(label) = label else {
            return Cow::Owned(RoleProfile::unfeatured(""));
        };
        match self.roles.iter().find(|r| r.label == label) {
            Some(role) => Cow::Borrowed(role),
            None => {
                debug!(role = %label, "Unknown role label, sorting without featured projects");
                Cow::Owned(RoleProfile::unfeatured(label))
            }
        }
    }

    pub fn facets(&self) -> CatalogFacets {
        let stack: BTreeSet<&str> = self
            .projects
            .iter()
            .flat_map(|p| p.tags.stack.iter().map(String::as_str))
            .collect();
        let industry: BTreeSet<&str> = self
            .projects
            .iter()
            .flat_map(|p| p.tags.industry.iter().map(String::as_str))
            .collect();
        let impact: BTreeSet<ImpactLevel> = self.projects.iter().map(|p| p.tags.impact).collect();

        CatalogFacets {
            stack: stack.into_iter().map(str::to_string).collect(),
            industry: industry.into_iter().map(str::to_string).collect(),
            impact: impact.into_iter().collect(),
            roles: self.roles.iter().map(|r| r.label.clone()).collect(),
        }
    }
}
