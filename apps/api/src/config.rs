use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::info;

use crate::matching::similarity::SynonymTable;
use crate::studios::catalog::StudioCatalog;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON array of studio records indexed at startup.
    pub studio_seed_path: Option<PathBuf>,
    /// JSON object `{"canonical": ["synonym", ...]}` replacing the built-in table.
    pub synonyms_path: Option<PathBuf>,
    /// Upper bound for `limit` on recommend and studio search.
    pub max_limit: usize,
    pub search_default_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            studio_seed_path: None,
            synonyms_path: None,
            max_limit: 100,
            search_default_limit: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let path = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            studio_seed_path: path("STUDIO_SEED_PATH"),
            synonyms_path: path("SYNONYMS_PATH"),
            max_limit: parse_or(&lookup, "MAX_RESULT_LIMIT", defaults.max_limit)?,
            search_default_limit: parse_or(
                &lookup,
                "SEARCH_DEFAULT_LIMIT",
                defaults.search_default_limit,
            )?,
        };

        anyhow::ensure!(config.max_limit > 0, "MAX_RESULT_LIMIT must be at least 1");
        anyhow::ensure!(
            (1..=config.max_limit).contains(&config.search_default_limit),
            "SEARCH_DEFAULT_LIMIT must be between 1 and MAX_RESULT_LIMIT"
        );
        Ok(config)
    }

    /// The configured synonym table, or the built-in one.
    pub fn synonym_table(&self) -> Result<SynonymTable> {
        let Some(path) = &self.synonyms_path else {
            return Ok(SynonymTable::default());
        };
        let table: SynonymTable = read_json(path, "synonym table")?;
        info!(groups = table.len(), path = %path.display(), "Loaded synonym table");
        Ok(table)
    }

    /// The seed catalog, or an empty one when no seed file is configured.
    pub fn seed_catalog(&self) -> Result<StudioCatalog> {
        let Some(path) = &self.studio_seed_path else {
            return Ok(StudioCatalog::default());
        };
        let catalog = StudioCatalog::load(path)?;
        info!(studios = catalog.len(), path = %path.display(), "Loaded studio seed");
        Ok(catalog)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid {what} in {}", path.display()))
}
