pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::errors::AppError;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::studios::handlers as studios;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/terms/similar", post(matching::handle_similar_terms))
        .route("/api/v1/match/score", post(matching::handle_score))
        .route("/api/v1/match/recommend", post(matching::handle_recommend))
        // Studio catalog API
        .route("/api/v1/studios", put(studios::handle_replace_catalog))
        .route("/api/v1/studios/search", get(studios::handle_search))
        .route("/api/v1/studios/:id", get(studios::handle_get_studio))
        .with_state(state)
}

/// Validates a caller-supplied `limit`: absent means `default`, otherwise it
/// must be in `1..=max`.
pub fn resolve_limit(requested: Option<usize>, default: usize, max: usize) -> Result<usize, AppError> {
    match requested {
        None => Ok(default.min(max)),
        Some(0) => Err(AppError::Validation("limit must be at least 1".to_string())),
        Some(n) if n > max => Err(AppError::Validation(format!(
            "limit must not exceed {max}"
        ))),
        Some(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::scorer::WeightedJobMatcher;
    use crate::matching::similarity::TermSimilarityResolver;
    use crate::matching::weights::MatchWeights;
    use crate::models::studio::OrganizationRecord;
    use crate::studios::catalog::{SharedCatalog, StudioCatalog};

    fn make_record(id: &str, name: &str, games: &[&str]) -> OrganizationRecord {
        OrganizationRecord {
            id: id.to_string(),
            name: name.to_string(),
            games: games.iter().map(|g| g.to_string()).collect(),
            ..OrganizationRecord::default()
        }
    }

    fn test_state() -> AppState {
        let resolver = TermSimilarityResolver::default();
        let catalog = StudioCatalog::from_records(vec![
            make_record("remedy", "Remedy Entertainment", &["Control", "Alan Wake"]),
            make_record("rovio", "Rovio", &["Angry Birds"]),
        ]);
        AppState {
            config: Config::default(),
            matcher: Arc::new(WeightedJobMatcher::new(
                MatchWeights::default(),
                resolver.clone(),
            )),
            resolver: Arc::new(resolver),
            catalog: SharedCatalog::new(catalog),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, 10, 100).unwrap(), 10);
        assert_eq!(resolve_limit(None, 10, 5).unwrap(), 5);
        assert_eq!(resolve_limit(Some(42), 10, 100).unwrap(), 42);
        assert!(resolve_limit(Some(0), 10, 100).is_err());
        assert!(resolve_limit(Some(101), 10, 100).is_err());
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(build_router(test_state()), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["studios"], 2);
    }

    #[tokio::test]
    async fn test_similar_terms() {
        let app = build_router(test_state());
        let (status, body) = send(
            app.clone(),
            json_request("POST", "/api/v1/terms/similar", json!({"a": "JavaScript", "b": "js"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["similar"], true);

        let (_, body) = send(
            app,
            json_request("POST", "/api/v1/terms/similar", json!({"a": "Unity", "b": "Unreal"})),
        )
        .await;
        assert_eq!(body["similar"], false);
    }

    #[tokio::test]
    async fn test_score_coerces_malformed_fields() {
        let request = json_request(
            "POST",
            "/api/v1/match/score",
            json!({
                "profile": {
                    "skills": ["unity", "c#"],
                    "experienceYears": "4",
                    "interests": "not a list",
                    "workStyle": "remote"
                },
                "job": {
                    "id": "j1",
                    "requirements": ["Unity", "C#", "Git"],
                    "experienceLevel": "mid",
                    "remote": true,
                    "salary": "competitive"
                }
            }),
        );
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_id"], "j1");
        assert_eq!(body["missing_skills"], json!(["Git"]));
        assert_eq!(body["match_breakdown"]["experience_match"], 100.0);
        assert_eq!(body["match_breakdown"]["location_match"], 100.0);
        assert_eq!(body["match_breakdown"]["salary_match"], 70.0);
        let score = body["match_score"].as_u64().unwrap();
        assert!(score <= 100);
    }

    #[tokio::test]
    async fn test_recommend_validates_limit() {
        let request = json_request(
            "POST",
            "/api/v1/match/recommend",
            json!({"profile": {}, "jobs": [], "limit": 0}),
        );
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_recommend_filters_weak_matches() {
        let request = json_request(
            "POST",
            "/api/v1/match/recommend",
            json!({
                "profile": {"skills": ["unity"], "workStyle": "remote", "experienceYears": 4},
                "jobs": [
                    {"id": "fit", "requirements": ["Unity"], "remote": true, "experienceLevel": "mid"},
                    {"id": "miss", "requirements": ["Haskell", "Erlang"], "remote": false, "experienceLevel": "director"}
                ]
            }),
        );
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["job_id"], "fit");
    }

    #[tokio::test]
    async fn test_studio_search() {
        let (status, body) = send(
            build_router(test_state()),
            get_request("/api/v1/studios/search?q=rovio&limit=5"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "rovio");
        assert_eq!(body["results"][0]["id"], "rovio");
        assert_eq!(body["results"][0]["match_type"], "exact");
    }

    #[tokio::test]
    async fn test_blank_studio_search_is_empty() {
        let (status, body) = send(
            build_router(test_state()),
            get_request("/api/v1/studios/search?q=%20"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_replace_catalog_then_lookup() {
        let app = build_router(test_state());

        let (status, body) = send(
            app.clone(),
            json_request(
                "PUT",
                "/api/v1/studios",
                json!({"records": [
                    {"id": "supercell", "name": "Supercell", "location": "Helsinki, Finland", "size": "300 employees"}
                ]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["indexed"], 1);

        let (status, body) = send(app.clone(), get_request("/api/v1/studios/supercell")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["normalized"]["region"], "Europe");
        assert_eq!(body["normalized"]["size_bucket"], "Large");

        let (status, body) = send(app, get_request("/api/v1/studios/rovio")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
