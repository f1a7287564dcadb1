//! Infrastructure layer for Parley.
//!
//! Keyed-store implementations of the core repository traits plus the
//! TOML-backed read-only record catalog.

pub mod dir_store;
pub mod keyed_store;
pub mod record_catalog;
pub mod repositories;

pub use crate::dir_store::DirStore;
pub use crate::keyed_store::{KeyedStore, MemoryStore};
pub use crate::record_catalog::RecordCatalog;
pub use crate::repositories::{
    KeyedEnrichmentRepository, KeyedLeaderboardRepository, KeyedScoreRepository,
    KeyedSessionRepository,
};
