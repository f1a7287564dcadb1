//! Leaderboard use case implementation.
//!
//! Loads the persisted leaderboard index and applies the core ranking and
//! insight aggregation. Filtering happens before ranking and truncation;
//! insights cover the full filtered set, never the truncated slice.

use std::sync::Arc;

use chrono::Utc;
use parley_core::error::Result;
use parley_core::leaderboard::{
    compute_insights, rank, InsightsSummary, LeaderboardFilter, LeaderboardRepository,
    RankedLeaderboard,
};

/// Use case for leaderboard views and summary statistics.
pub struct LeaderboardUseCase {
    leaderboard_repository: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardUseCase {
    pub fn new(leaderboard_repository: Arc<dyn LeaderboardRepository>) -> Self {
        Self {
            leaderboard_repository,
        }
    }

    /// Produces the ranked, truncated view for a filter, with the
    /// post-filter and pre-filter totals.
    pub async fn list(&self, filter: &LeaderboardFilter) -> Result<RankedLeaderboard> {
        let stored = self.leaderboard_repository.list_all().await?;
        Ok(rank(&stored, filter, Utc::now()))
    }

    /// Computes insight statistics over the full filtered set.
    pub async fn insights(&self, filter: &LeaderboardFilter) -> Result<InsightsSummary> {
        let now = Utc::now();
        let filtered: Vec<_> = self
            .leaderboard_repository
            .list_all()
            .await?
            .into_iter()
            .filter(|entry| filter.matches(entry, now))
            .collect();
        Ok(compute_insights(&filtered))
    }
}
