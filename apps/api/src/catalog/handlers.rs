//! Axum route handlers for the Projects API.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::catalog::deep_link::NavigationQuery;
use crate::catalog::filter::FilterCriteria;
use crate::catalog::view::{render, ViewState};
use crate::catalog::CatalogFacets;
use crate::errors::AppError;
use crate::models::project::{ImpactLevel, ProjectRecord, RoleProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProjectsResponse<'a> {
    role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    view: ViewState<'a>,
}

/// Resolves filter widget values from the query string.
/// Repeated keys (`stack=Rust&stack=Docker`) build up a set; `q` is the first value.
fn criteria_from_query(nav: &NavigationQuery) -> Result<FilterCriteria, AppError> {
    let values = |key: &str| -> BTreeSet<String> {
        nav.all(key)
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect()
    };

    let impact = nav
        .all("impact")
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<ImpactLevel>())
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(FilterCriteria::new(
        values("stack"),
        values("industry"),
        impact,
        nav.first("q").unwrap_or_default(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/projects
///
/// Renders the catalog view: a single case study when `case` (or `case_id`) names a known
/// project, otherwise the filtered list ordered for the active `role`.
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let nav = NavigationQuery::from_pairs(pairs);
    let criteria = criteria_from_query(&nav)?;

    // An empty `role=` names no role, same as an empty filter value.
    let label = nav
        .first("role")
        .filter(|label| !label.is_empty())
        .or(state.config.default_role.as_deref());
    let role = state.catalog.resolve_role(label);

    let view = render(&state.catalog, &nav, &criteria, &role);
    let message = match &view {
        ViewState::List(list) => {
            debug!(
                results = list.projects.len(),
                unconstrained = criteria.is_unconstrained(),
                query = criteria.query(),
                missing_case = ?list.missing_case,
                "Rendered project list"
            );
            list.message()
        }
        ViewState::Detail { project } => {
            debug!(project_id = %project.id, "Rendered case study");
            None
        }
    };

    Ok(Json(ProjectsResponse {
        role: &role.label,
        message,
        view,
    })
    .into_response())
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectRecord>, AppError> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleProfile>> {
    Json(state.catalog.roles().to_vec())
}

/// GET /api/v1/facets
///
/// Option lists for the stack / industry / impact / role selectors.
pub async fn handle_facets(State(state): State<AppState>) -> Json<CatalogFacets> {
    Json(state.catalog.facets())
}
