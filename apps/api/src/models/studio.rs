#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// A studio/organization record as delivered by the ingestion layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, alias = "location", deserialize_with = "lenient::string")]
    pub headquarters: String,
    /// Free-text size descriptor, e.g. "51-200 employees" or "Indie".
    #[serde(default, deserialize_with = "lenient::string")]
    pub size: String,
    #[serde(default, alias = "products", deserialize_with = "lenient::strings")]
    pub games: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub technologies: Vec<String>,
    #[serde(
        default,
        alias = "commonRoles",
        alias = "roles",
        deserialize_with = "lenient::strings"
    )]
    pub common_roles: Vec<String>,
    /// Optional taxonomy (genres, platforms) carried through to the normalized record.
    #[serde(default, deserialize_with = "lenient::strings")]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    Asia,
    Oceania,
    Other,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Oceania => "Oceania",
            Region::Other => "Other",
        }
    }
}

/// Headcount bucket: Indie (<10), Small (11–50), Mid (51–200), Large (201–1000), Enterprise (1000+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeBucket {
    Indie,
    Small,
    Mid,
    Large,
    Enterprise,
}

impl SizeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeBucket::Indie => "Indie",
            SizeBucket::Small => "Small",
            SizeBucket::Mid => "Mid",
            SizeBucket::Large => "Large",
            SizeBucket::Enterprise => "Enterprise",
        }
    }
}

// Variants are declared alphabetically so the derived `Ord` sorts by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleCategory {
    Art,
    Audio,
    Community,
    DataAnalytics,
    Design,
    Engineering,
    Other,
    Production,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Art => "ART",
            RoleCategory::Audio => "AUDIO",
            RoleCategory::Community => "COMMUNITY",
            RoleCategory::DataAnalytics => "DATA_ANALYTICS",
            RoleCategory::Design => "DESIGN",
            RoleCategory::Engineering => "ENGINEERING",
            RoleCategory::Other => "OTHER",
            RoleCategory::Production => "PRODUCTION",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, searchable attributes derived from an [`OrganizationRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAttributes {
    pub region: Region,
    pub size_bucket: SizeBucket,
    pub categories: Vec<String>,
    pub tech_tags: Vec<String>,
    pub role_categories: Vec<RoleCategory>,
    pub search_tokens: BTreeSet<String>,
}

/// A raw record plus its derived attributes. Re-derive on source update; never patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntity {
    #[serde(flatten)]
    pub record: OrganizationRecord,
    pub normalized: NormalizedAttributes,
}

impl NormalizedEntity {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// The underlying raw fields, suitable for re-normalizing.
    pub fn to_raw(&self) -> OrganizationRecord {
        self.record.clone()
    }
}
