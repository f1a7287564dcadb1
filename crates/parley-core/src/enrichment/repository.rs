//! Enrichment cache repository trait.

use super::model::{EnrichmentKey, EnrichmentRecord};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the enrichment cache.
///
/// This is an explicit cache object with explicit invalidation, not
/// implicit module-level state. At most one record is persisted per key;
/// the `save_if_absent` discipline keeps duplicate concurrent generations
/// from corrupting the cache (first write wins, the loser is discarded).
#[async_trait]
pub trait EnrichmentRepository: Send + Sync {
    /// Finds the cached record for a key.
    async fn find(&self, key: &EnrichmentKey) -> Result<Option<EnrichmentRecord>>;

    /// Persists a record unless one already exists for the key.
    ///
    /// Returns `true` when this call stored the record and `false` when an
    /// existing record was kept.
    async fn save_if_absent(&self, key: &EnrichmentKey, record: &EnrichmentRecord)
        -> Result<bool>;

    /// Removes the record for one key. Missing keys are not an error.
    async fn invalidate(&self, key: &EnrichmentKey) -> Result<()>;

    /// Removes every cached record.
    async fn invalidate_all(&self) -> Result<()>;
}
