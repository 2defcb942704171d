#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::studio::{NormalizedEntity, OrganizationRecord};
use crate::studios::index::SearchIndex;
use crate::studios::normalizer::EntityNormalizer;
use crate::studios::query::{query, RankedResult};

/// An immutable, searchable snapshot of the studio catalog.
///
/// Entities and their index are always built together, so a snapshot can
/// never answer from an index that belongs to a different corpus.
#[derive(Debug, Default)]
pub struct StudioCatalog {
    entities: Vec<NormalizedEntity>,
    index: SearchIndex,
    positions: HashMap<String, usize>,
}

impl StudioCatalog {
    /// Normalizes and indexes `records`. Ids are trimmed; records with a blank
    /// id, or an id already seen earlier in the batch, are skipped.
    pub fn from_records(records: Vec<OrganizationRecord>) -> Self {
        let mut seen = HashSet::new();
        let accepted: Vec<OrganizationRecord> = records
            .into_iter()
            .filter_map(|mut record| {
                let id = record.id.trim();
                if id.is_empty() {
                    warn!(name = %record.name, "Skipping studio record without an id");
                    return None;
                }
                if !seen.insert(id.to_string()) {
                    warn!(id, "Skipping duplicate studio record");
                    return None;
                }
                record.id = id.to_string();
                Some(record)
            })
            .collect();

        let normalizer = EntityNormalizer::from_corpus(&accepted);
        let entities = normalizer.normalize_all(&accepted);
        let index = SearchIndex::build(&entities);
        let positions = entities
            .iter()
            .enumerate()
            .map(|(pos, entity)| (entity.id().to_string(), pos))
            .collect();

        debug!(
            entities = entities.len(),
            index_keys = index.key_count(),
            "Built studio catalog"
        );

        Self {
            entities,
            index,
            positions,
        }
    }

    /// Reads a JSON array of raw records from `path` and builds a catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read studio seed file {}", path.display()))?;
        let records: Vec<OrganizationRecord> = serde_json::from_str(&raw).with_context(|| {
            format!(
                "Studio seed file {} must be a JSON array of records",
                path.display()
            )
        })?;
        Ok(Self::from_records(records))
    }

    /// Ranked matches for `q`, at most `limit` of them.
    pub fn search(&self, q: &str, limit: usize) -> Vec<RankedResult> {
        let mut results = query(q, &self.index, &self.entities);
        results.truncate(limit);
        results
    }

    /// Every match for `q`, unlimited.
    pub fn search_all(&self, q: &str) -> Vec<RankedResult> {
        query(q, &self.index, &self.entities)
    }

    pub fn get(&self, id: &str) -> Option<&NormalizedEntity> {
        self.positions.get(id).map(|&pos| &self.entities[pos])
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn index_keys(&self) -> usize {
        self.index.key_count()
    }
}

/// The live catalog shared by all handlers.
///
/// Readers take a cheap `Arc` snapshot and release the lock at once; writers
/// build the replacement off-lock and only hold the write lock for the swap.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<StudioCatalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: StudioCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    pub fn snapshot(&self) -> Arc<StudioCatalog> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Publishes `catalog` and returns the snapshot it replaced.
    pub fn replace(&self, catalog: StudioCatalog) -> Arc<StudioCatalog> {
        let next = Arc::new(catalog);
        let entities = next.len();
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *guard, next)
        };
        info!(
            entities,
            previous = previous.len(),
            "Published new studio catalog"
        );
        previous
    }
}
