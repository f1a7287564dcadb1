//! Leaderboard ranking and insight aggregation.
//!
//! Pure functions over persisted leaderboard entries. Filtering applies
//! before ranking and before truncation; insights are computed over the
//! full filtered set, never the truncated slice.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{LeaderboardEntry, LeaderboardFilter, RankedLeaderboard};

/// Ranks the stored entries for a query.
///
/// Ordering is score descending, then `completed_at` descending, so for
/// tied scores the most recently completed entry wins. The result is truncated
/// to the filter's effective limit, and both the post-filter count
/// (`total_matched`) and the pre-filter count (`total_stored`) are
/// reported.
pub fn rank(
    stored: &[LeaderboardEntry],
    filter: &LeaderboardFilter,
    now: DateTime<Utc>,
) -> RankedLeaderboard {
    let total_stored = stored.len();

    let mut matched: Vec<LeaderboardEntry> = stored
        .iter()
        .filter(|entry| filter.matches(entry, now))
        .cloned()
        .collect();
    let total_matched = matched.len();

    matched.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.completed_at.cmp(&a.completed_at))
    });
    matched.truncate(filter.effective_limit());

    RankedLeaderboard {
        entries: matched,
        total_matched,
        total_stored,
    }
}

/// Summary statistics over a filtered set of leaderboard entries.
///
/// Distribution maps are keyed by the display form of the respective enum.
/// Empty input is a valid state and yields zeroed statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub total_sessions: usize,
    pub average_score: f64,
    pub top_score: Option<i64>,
    pub grade_distribution: BTreeMap<String, usize>,
    pub outcome_distribution: BTreeMap<String, usize>,
    pub difficulty_distribution: BTreeMap<String, usize>,
}

/// Computes insight statistics over a filtered entry set.
pub fn compute_insights(entries: &[LeaderboardEntry]) -> InsightsSummary {
    let total_sessions = entries.len();
    let average_score = if total_sessions == 0 {
        0.0
    } else {
        entries.iter().map(|e| e.score as f64).sum::<f64>() / total_sessions as f64
    };
    let top_score = entries.iter().map(|e| e.score).max();

    let mut grade_distribution = BTreeMap::new();
    let mut outcome_distribution = BTreeMap::new();
    let mut difficulty_distribution = BTreeMap::new();
    for entry in entries {
        *grade_distribution.entry(entry.grade.to_string()).or_insert(0) += 1;
        *outcome_distribution
            .entry(entry.outcome.to_string())
            .or_insert(0) += 1;
        *difficulty_distribution
            .entry(entry.difficulty.to_string())
            .or_insert(0) += 1;
    }

    InsightsSummary {
        total_sessions,
        average_score,
        top_score,
        grade_distribution,
        outcome_distribution,
        difficulty_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::model::TimeRange;
    use crate::scoring::Grade;
    use crate::session::{Difficulty, SessionOutcome};
    use chrono::Duration;

    fn entry(token: &str, score: i64, completed_at: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            token: token.to_string(),
            score,
            grade: Grade::from_score(score),
            outcome: SessionOutcome::PoliteExit,
            difficulty: Difficulty::Medium,
            completed_at,
            conference_id: "conf-1".to_string(),
            conference_name: "DevSummit".to_string(),
            persona_id: "persona-1".to_string(),
            persona_name: "Avery".to_string(),
            trainee_id: Some("trainee-1".to_string()),
            trainee_name: Some("Sam".to_string()),
            job_title: Some("AE".to_string()),
        }
    }

    #[test]
    fn test_tied_scores_order_most_recent_first() {
        let now = Utc::now();
        let t1 = now - Duration::hours(3);
        let t2 = now - Duration::hours(2);
        let t3 = now - Duration::hours(1);
        let stored = vec![entry("a", 80, t1), entry("b", 95, t2), entry("c", 95, t3)];

        let ranked = rank(&stored, &LeaderboardFilter::default(), now);

        let tokens: Vec<&str> = ranked.entries.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, vec!["c", "b", "a"]);
        assert_eq!(ranked.total_matched, 3);
        assert_eq!(ranked.total_stored, 3);
    }

    #[test]
    fn test_range_24h_excludes_straddling_boundary() {
        let now = Utc::now();
        let inside = entry("in", 50, now - Duration::hours(23));
        let outside = entry("out", 99, now - Duration::hours(25));
        let stored = vec![inside, outside];

        let filter = LeaderboardFilter {
            range: TimeRange::Day,
            ..Default::default()
        };
        let ranked = rank(&stored, &filter, now);

        assert_eq!(ranked.entries.len(), 1);
        assert_eq!(ranked.entries[0].token, "in");
        assert_eq!(ranked.total_matched, 1);
        assert_eq!(ranked.total_stored, 2);
    }

    #[test]
    fn test_filter_applies_before_truncation() {
        let now = Utc::now();
        let mut stored = Vec::new();
        for i in 0..30 {
            let mut e = entry(&format!("t{i}"), i, now - Duration::minutes(i));
            if i % 2 == 0 {
                e.conference_id = "conf-2".to_string();
            }
            stored.push(e);
        }

        let filter = LeaderboardFilter {
            conference_id: Some("conf-1".to_string()),
            limit: Some(5),
            ..Default::default()
        };
        let ranked = rank(&stored, &filter, now);

        assert_eq!(ranked.entries.len(), 5);
        assert_eq!(ranked.total_matched, 15);
        assert_eq!(ranked.total_stored, 30);
        assert!(ranked.entries.iter().all(|e| e.conference_id == "conf-1"));
    }

    #[test]
    fn test_limit_defaults_and_hard_cap() {
        let now = Utc::now();
        let stored: Vec<LeaderboardEntry> = (0..250)
            .map(|i| entry(&format!("t{i}"), i as i64 % 100, now - Duration::minutes(i)))
            .collect();

        let default_ranked = rank(&stored, &LeaderboardFilter::default(), now);
        assert_eq!(default_ranked.entries.len(), 20);

        let capped = rank(
            &stored,
            &LeaderboardFilter {
                limit: Some(1000),
                ..Default::default()
            },
            now,
        );
        assert_eq!(capped.entries.len(), 200);
        assert_eq!(capped.total_matched, 250);
    }

    #[test]
    fn test_insights_over_filtered_set_not_slice() {
        let now = Utc::now();
        let stored: Vec<LeaderboardEntry> = (0..40)
            .map(|i| entry(&format!("t{i}"), 90, now - Duration::minutes(i)))
            .collect();

        // Insights are computed on the filtered set, independent of limit.
        let filter = LeaderboardFilter::default();
        let filtered: Vec<LeaderboardEntry> = stored
            .iter()
            .filter(|e| filter.matches(e, now))
            .cloned()
            .collect();
        let insights = compute_insights(&filtered);

        assert_eq!(insights.total_sessions, 40);
        assert_eq!(insights.average_score, 90.0);
        assert_eq!(insights.top_score, Some(90));
        assert_eq!(insights.grade_distribution.get("A"), Some(&40));
    }

    #[test]
    fn test_insights_empty_input_is_valid() {
        let insights = compute_insights(&[]);
        assert_eq!(insights.total_sessions, 0);
        assert_eq!(insights.average_score, 0.0);
        assert_eq!(insights.top_score, None);
        assert!(insights.grade_distribution.is_empty());
    }
}
