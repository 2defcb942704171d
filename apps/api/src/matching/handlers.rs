//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::scorer::{MatchResult, DEFAULT_RECOMMEND_LIMIT};
use crate::models::job::JobPosting;
use crate::models::lenient;
use crate::models::profile::CandidateProfile;
use crate::routes::resolve_limit;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SimilarTermsRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    pub a: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub b: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarTermsResponse {
    pub a: String,
    pub b: String,
    pub similar: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub profile: CandidateProfile,
    #[serde(default)]
    pub job: JobPosting,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub profile: CandidateProfile,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub results: Vec<MatchResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/terms/similar
pub async fn handle_similar_terms(
    State(state): State<AppState>,
    Json(req): Json<SimilarTermsRequest>,
) -> Json<SimilarTermsResponse> {
    let similar = state.resolver.are_similar(&req.a, &req.b);
    Json(SimilarTermsResponse {
        a: req.a,
        b: req.b,
        similar,
    })
}

/// POST /api/v1/match/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Json<MatchResult> {
    Json(state.matcher.score(&req.profile, &req.job))
}

/// POST /api/v1/match/recommend
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let limit = resolve_limit(req.limit, DEFAULT_RECOMMEND_LIMIT, state.config.max_limit)?;
    let results = state.matcher.recommend(&req.profile, &req.jobs, limit);
    Ok(Json(RecommendResponse { results }))
}
