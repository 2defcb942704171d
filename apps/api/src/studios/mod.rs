// Studio catalog: normalization, prefix index, tiered fuzzy search.
// The engine modules are pure; `catalog` owns the published snapshot.

pub mod catalog;
pub mod handlers;
pub mod index;
pub mod normalizer;
pub mod query;
