//! Axum route handlers for the Studio catalog API.

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::studio::{NormalizedEntity, OrganizationRecord};
use crate::routes::resolve_limit;
use crate::state::AppState;
use crate::studios::catalog::StudioCatalog;
use crate::studios::query::RankedResult;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    /// Matches before the limit was applied.
    pub total: usize,
    pub results: Vec<RankedResult>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceCatalogRequest {
    #[serde(default)]
    pub records: Vec<OrganizationRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceCatalogResponse {
    pub indexed: usize,
    pub index_keys: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/studios/search?q=&limit=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let limit = resolve_limit(
        params.limit,
        state.config.search_default_limit,
        state.config.max_limit,
    )?;

    let catalog = state.catalog.snapshot();
    let mut results = catalog.search_all(&params.q);
    let total = results.len();
    results.truncate(limit);

    debug!(query = %params.q, total, returned = results.len(), "Studio search");

    Ok(Json(SearchResponse {
        query: params.q,
        total,
        results,
    }))
}

/// PUT /api/v1/studios
/// Replaces the whole catalog. The new snapshot is built before it is published.
pub async fn handle_replace_catalog(
    State(state): State<AppState>,
    Json(req): Json<ReplaceCatalogRequest>,
) -> Result<Json<ReplaceCatalogResponse>, AppError> {
    let catalog = tokio::task::spawn_blocking(move || StudioCatalog::from_records(req.records))
        .await
        .context("Catalog rebuild task failed")?;

    let response = ReplaceCatalogResponse {
        indexed: catalog.len(),
        index_keys: catalog.index_keys(),
    };
    state.catalog.replace(catalog);
    Ok(Json(response))
}

/// GET /api/v1/studios/:id
pub async fn handle_get_studio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NormalizedEntity>, AppError> {
    let catalog = state.catalog.snapshot();
    catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Studio {id} not found")))
}
