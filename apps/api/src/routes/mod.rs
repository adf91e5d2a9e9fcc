pub mod health;

use axum::{routing::get, Router};

use crate::catalog::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/projects", get(handlers::handle_list_projects))
        .route("/api/v1/projects/:id", get(handlers::handle_get_project))
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .route("/api/v1/facets", get(handlers::handle_facets))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;

    const SAMPLE_CATALOG: &str = include_str!("../../data/catalog.json");

    fn app(default_role: Option<&str>) -> Router {
        let catalog = Catalog::from_json_str(SAMPLE_CATALOG).unwrap();
        let config = Config {
            catalog_path: "data/catalog.json".into(),
            default_role: default_role.map(str::to_string),
            port: 0,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            catalog: Arc::new(catalog),
            config,
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ids(body: &Value) -> Vec<String> {
        body["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unfiltered_list_sorted_by_recency() {
        let (status, body) = get_json(app(None), "/api/v1/projects").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "list");
        assert_eq!(body["status"], "results");
        assert_eq!(
            ids(&body),
            ["genomesage", "vision", "disease-simulation", "smpbed", "market-pulse"]
        );
    }

    #[tokio::test]
    async fn test_role_features_projects_first() {
        let (_, body) = get_json(app(None), "/api/v1/projects?role=Product").await;
        assert_eq!(body["role"], "Product");
        assert_eq!(
            ids(&body),
            ["vision", "market-pulse", "genomesage", "disease-simulation", "smpbed"]
        );
    }

    #[tokio::test]
    async fn test_default_role_from_config() {
        let (_, body) = get_json(app(Some("Product")), "/api/v1/projects").await;
        assert_eq!(body["role"], "Product");
        assert_eq!(ids(&body)[0], "vision");

        let (_, body) = get_json(app(Some("Product")), "/api/v1/projects?role=Design").await;
        assert_eq!(body["role"], "Design");
    }

    #[tokio::test]
    async fn test_empty_role_param_uses_default_role() {
        let (status, body) = get_json(app(Some("Product")), "/api/v1/projects?role=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "Product");
        assert_eq!(ids(&body)[0], "vision");
    }

    #[tokio::test]
    async fn test_unknown_role_degrades_to_recency() {
        let (status, body) = get_json(app(None), "/api/v1/projects?role=Astronaut").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body)[0], "genomesage");
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let (_, body) = get_json(
            app(None),
            "/api/v1/projects?stack=Python&stack=Rust&industry=Healthcare&impact=high",
        )
        .await;
        assert_eq!(ids(&body), ["genomesage"]);
    }

    #[tokio::test]
    async fn test_query_search() {
        let (_, body) = get_json(app(None), "/api/v1/projects?q=VISION").await;
        assert_eq!(ids(&body), ["vision"]);
    }

    #[tokio::test]
    async fn test_no_matches_is_ok_with_message() {
        let (status, body) = get_json(app(None), "/api/v1/projects?q=zzz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_matches");
        assert_eq!(body["message"], "No projects match your current filters.");
        assert!(ids(&body).is_empty());
    }

    #[tokio::test]
    async fn test_deep_link_detail() {
        let (status, body) = get_json(app(None), "/api/v1/projects?case=vision&q=zzz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "detail");
        assert_eq!(body["project"]["id"], "vision");
    }

    #[tokio::test]
    async fn test_legacy_deep_link_alias() {
        let (_, body) = get_json(app(None), "/api/v1/projects?case_id=smpbed").await;
        assert_eq!(body["view"], "detail");
        assert_eq!(body["project"]["id"], "smpbed");
    }

    #[tokio::test]
    async fn test_unknown_deep_link_falls_back_to_list() {
        let (status, body) = get_json(app(None), "/api/v1/projects?case=nonexistent").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "list");
        assert_eq!(body["missing_case"], "nonexistent");
        assert_eq!(ids(&body).len(), 5);
    }

    #[tokio::test]
    async fn test_bad_impact_is_400() {
        let (status, body) = get_json(app(None), "/api/v1/projects?impact=galactic").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_project_by_id() {
        let (status, body) = get_json(app(None), "/api/v1/projects/genomesage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "GenomeSage");
        assert_eq!(body["narrative"][0]["label"], "Problem");

        let (status, body) = get_json(app(None), "/api/v1/projects/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_roles_and_facets() {
        let (_, roles) = get_json(app(None), "/api/v1/roles").await;
        assert_eq!(roles.as_array().unwrap().len(), 3);

        let (_, facets) = get_json(app(None), "/api/v1/facets").await;
        assert_eq!(facets["roles"][0], "Data Science");
        assert_eq!(facets["impact"], serde_json::json!(["low", "medium", "high"]));
        let stack: Vec<&str> = facets["stack"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let mut sorted = stack.clone();
        sorted.sort();
        assert_eq!(stack, sorted);
    }
}
