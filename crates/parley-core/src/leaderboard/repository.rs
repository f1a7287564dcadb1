//! Leaderboard repository trait.

use super::model::LeaderboardEntry;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the leaderboard index.
///
/// Entries are append-only projections of completed scores; re-appending
/// the same token overwrites the previous projection.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Appends (or replaces) the entry for its invite token.
    async fn append(&self, entry: &LeaderboardEntry) -> Result<()>;

    /// Lists every stored entry, unordered.
    async fn list_all(&self) -> Result<Vec<LeaderboardEntry>>;
}
