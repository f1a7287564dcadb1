//! Score repository trait.

use super::model::ScoreRecord;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisted scores, keyed by invite token.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Finds a score by its invite token.
    async fn find_by_token(&self, token: &str) -> Result<Option<ScoreRecord>>;

    /// Saves a score. Re-saving the same token overwrites; callers rely on
    /// deterministic re-computation to make that idempotent.
    async fn save(&self, score: &ScoreRecord) -> Result<()>;

    /// Lists all stored scores.
    async fn list_all(&self) -> Result<Vec<ScoreRecord>>;
}
