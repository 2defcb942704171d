use std::sync::Arc;

use crate::config::Config;
use crate::matching::scorer::JobMatcher;
use crate::matching::similarity::TermSimilarityResolver;
use crate::studios::catalog::SharedCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable job matcher. Default: WeightedJobMatcher.
    pub matcher: Arc<dyn JobMatcher>,
    /// The resolver the matcher was built with, for direct term lookups.
    pub resolver: Arc<TermSimilarityResolver>,
    /// Live studio catalog; rebuilt snapshots are swapped in whole.
    pub catalog: SharedCatalog,
}
