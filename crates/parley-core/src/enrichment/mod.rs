//! Enrichment domain module.
//!
//! # Module Structure
//!
//! - `model`: Key, record, and status types
//! - `repository`: Cache repository trait with explicit invalidation
//! - `provider`: Generation provider trait

mod model;
mod provider;
mod repository;

// Re-export public API
pub use model::{EnrichmentInput, EnrichmentKey, EnrichmentOutput, EnrichmentRecord, EnsureStatus};
pub use provider::EnrichmentProvider;
pub use repository::EnrichmentRepository;
