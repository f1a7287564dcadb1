//! Leaderboard domain models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Grade, ScoreRecord};
use crate::session::{Difficulty, SessionOutcome};

/// Read-mostly projection of a score plus display metadata.
///
/// Created when a session completes with a resolvable invite token; never
/// mutated afterward. Ordering is computed at query time, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Invite token linking back to the score/review view
    pub token: String,
    pub score: i64,
    pub grade: Grade,
    pub outcome: SessionOutcome,
    pub difficulty: Difficulty,
    pub completed_at: DateTime<Utc>,
    pub conference_id: String,
    pub conference_name: String,
    pub persona_id: String,
    pub persona_name: String,
    pub trainee_id: Option<String>,
    pub trainee_name: Option<String>,
    pub job_title: Option<String>,
}

impl From<&ScoreRecord> for LeaderboardEntry {
    fn from(score: &ScoreRecord) -> Self {
        Self {
            token: score.token.clone(),
            score: score.score,
            grade: score.grade,
            outcome: score.outcome,
            difficulty: score.difficulty,
            completed_at: score.completed_at,
            conference_id: score.conference_id.clone(),
            conference_name: score.conference_name.clone(),
            persona_id: score.persona_id.clone(),
            persona_name: score.persona_name.clone(),
            trainee_id: score.trainee_id.clone(),
            trainee_name: score.trainee_name.clone(),
            job_title: score.job_title.clone(),
        }
    }
}

/// Time window a leaderboard query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    All,
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::All
    }
}

impl TimeRange {
    /// Parses the wire form (`24h`, `7d`, `30d`, `all`).
    pub fn parse(value: &str) -> Option<TimeRange> {
        match value {
            "24h" => Some(TimeRange::Day),
            "7d" => Some(TimeRange::Week),
            "30d" => Some(TimeRange::Month),
            "all" => Some(TimeRange::All),
            _ => None,
        }
    }

    /// Inclusive lower bound for `completed_at`, or `None` for `all`.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Day => Some(now - Duration::hours(24)),
            TimeRange::Week => Some(now - Duration::days(7)),
            TimeRange::Month => Some(now - Duration::days(30)),
            TimeRange::All => None,
        }
    }
}

/// Default number of entries returned by a leaderboard query.
pub const DEFAULT_LIMIT: usize = 20;
/// Hard cap on the number of entries a query may request.
pub const MAX_LIMIT: usize = 200;

/// Filter parameters for a leaderboard query.
///
/// Filtering applies before ranking and before truncation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardFilter {
    #[serde(default)]
    pub range: TimeRange,
    #[serde(default)]
    pub conference_id: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub trainee_id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    /// Requested entry count; `None` means [`DEFAULT_LIMIT`], values above
    /// [`MAX_LIMIT`] are capped.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl LeaderboardFilter {
    /// Effective limit after defaulting and capping.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    /// Whether an entry passes every filter dimension at query time `now`.
    pub fn matches(&self, entry: &LeaderboardEntry, now: DateTime<Utc>) -> bool {
        if let Some(cutoff) = self.range.cutoff(now) {
            if entry.completed_at < cutoff {
                return false;
            }
        }
        if let Some(conference_id) = &self.conference_id {
            if &entry.conference_id != conference_id {
                return false;
            }
        }
        if let Some(persona_id) = &self.persona_id {
            if &entry.persona_id != persona_id {
                return false;
            }
        }
        if let Some(trainee_id) = &self.trainee_id {
            if entry.trainee_id.as_ref() != Some(trainee_id) {
                return false;
            }
        }
        if let Some(job_title) = &self.job_title {
            if entry.job_title.as_ref() != Some(job_title) {
                return false;
            }
        }
        true
    }
}

/// Result of a leaderboard query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLeaderboard {
    /// Ranked, truncated entries
    pub entries: Vec<LeaderboardEntry>,
    /// Post-filter, pre-truncation count
    pub total_matched: usize,
    /// Pre-filter count
    pub total_stored: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_parses_wire_forms() {
        assert_eq!(TimeRange::parse("24h"), Some(TimeRange::Day));
        assert_eq!(TimeRange::parse("7d"), Some(TimeRange::Week));
        assert_eq!(TimeRange::parse("30d"), Some(TimeRange::Month));
        assert_eq!(TimeRange::parse("all"), Some(TimeRange::All));
        assert_eq!(TimeRange::parse("90d"), None);
        assert_eq!(TimeRange::parse(""), None);
    }

    #[test]
    fn test_time_range_cutoffs() {
        let now = Utc::now();
        assert_eq!(
            TimeRange::Day.cutoff(now),
            Some(now - Duration::hours(24))
        );
        assert_eq!(TimeRange::All.cutoff(now), None);
    }
}
