//! Leaderboard domain module.
//!
//! # Module Structure
//!
//! - `model`: Entry, filter, and time-range models
//! - `aggregator`: Pure ranking and insight computation
//! - `repository`: Repository trait for the leaderboard index

mod aggregator;
mod model;
mod repository;

// Re-export public API
pub use aggregator::{compute_insights, rank, InsightsSummary};
pub use model::{
    LeaderboardEntry, LeaderboardFilter, RankedLeaderboard, TimeRange, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use repository::LeaderboardRepository;
