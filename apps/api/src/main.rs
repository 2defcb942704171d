mod config;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod studios;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::matching::scorer::WeightedJobMatcher;
use crate::matching::similarity::TermSimilarityResolver;
use crate::matching::weights::MatchWeights;
use crate::routes::build_router;
use crate::state::AppState;
use crate::studios::catalog::SharedCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Match API v{}", env!("CARGO_PKG_VERSION"));

    // Term resolver shared by the matcher and the similarity endpoint
    let synonyms = config.synonym_table()?;
    info!("Synonym table ready ({} groups)", synonyms.len());
    let resolver = TermSimilarityResolver::new(synonyms);

    // Initialize job matcher (WeightedJobMatcher by default)
    let matcher = Arc::new(WeightedJobMatcher::new(
        MatchWeights::default(),
        resolver.clone(),
    ));

    // Seed the studio catalog
    let catalog = SharedCatalog::new(config.seed_catalog()?);
    info!("Studio catalog ready ({} studios)", catalog.snapshot().len());

    // Build app state
    let state = AppState {
        config: config.clone(),
        matcher,
        resolver: Arc::new(resolver),
        catalog,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
