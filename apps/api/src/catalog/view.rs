//! Two-state display model: the filtered list, or one case study.

use serde::Serialize;

use crate::catalog::deep_link::{resolve_deep_link, DeepLink, NavigationQuery};
use crate::catalog::filter::{filter_and_sort, FilterCriteria};
use crate::catalog::Catalog;
use crate::models::project::{ProjectRecord, RoleProfile};

pub const NO_MATCHES_MESSAGE: &str = "No projects match your current filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    Results,
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView<'a> {
    pub projects: Vec<&'a ProjectRecord>,
    pub status: ListStatus,
    /// Deep-link id that matched nothing. The list is still shown underneath.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_case: Option<&'a str>,
}

impl<'a> ListView<'a> {
    fn new(projects: Vec<&'a ProjectRecord>, missing_case: Option<&'a str>) -> Self {
        let status = if projects.is_empty() {
            ListStatus::NoMatches
        } else {
            ListStatus::Results
        };
        Self {
            projects,
            status,
            missing_case,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            ListStatus::NoMatches => Some(NO_MATCHES_MESSAGE),
            ListStatus::Results => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState<'a> {
    List(ListView<'a>),
    Detail { project: &'a ProjectRecord },
}

/// Renders the view for one interaction. Pure: same inputs, same output.
///
/// Empty navigation, empty criteria and an unfeatured role give the initial state:
/// the whole catalog, newest first.
pub fn render<'a>(
    catalog: &'a Catalog,
    nav: &'a NavigationQuery,
    criteria: &FilterCriteria,
    role: &RoleProfile,
) -> ViewState<'a> {
    let link = resolve_deep_link(catalog.projects(), nav);
    if let Some(project) = link.record() {
        return ViewState::Detail { project };
    }
    let missing_case = match link {
        DeepLink::NotFound(id) => Some(id),
        _ => None,
    };

    let projects = filter_and_sort(catalog.projects(), criteria, role);
    ViewState::List(ListView::new(projects, missing_case))
}
