//! Score domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::session::{Difficulty, SessionOutcome};

/// Letter grade derived from a numeric score.
///
/// The grade is a monotonic step function of the score with fixed
/// boundaries: A >= 90, B >= 80, C >= 70, D >= 60, F otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Maps a clamped numeric score to its letter grade.
    pub fn from_score(score: i64) -> Grade {
        match score {
            s if s >= 90 => Grade::A,
            s if s >= 80 => Grade::B,
            s if s >= 70 => Grade::C,
            s if s >= 60 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// Structured breakdown of how a score was computed.
///
/// `raw_total` is the pre-clamp sum; the reportable score is `raw_total`
/// clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Number of funnel states reached, including the initial one
    pub states_reached: usize,
    /// Points awarded for forward transitions
    pub funnel_progress: i64,
    /// Bonus for the terminal outcome classification
    pub outcome_bonus: i64,
    /// Total penalty from recorded violations (non-positive)
    pub violation_penalty: i64,
    /// Bonus when the session duration fell inside the target window
    pub duration_bonus: i64,
    /// Pre-clamp sum of all components
    pub raw_total: i64,
}

/// A completed session's score, keyed by invite token.
///
/// Created exactly once per session end. Re-computation from the same
/// session content is deterministic; the denormalized display fields exist
/// so the leaderboard never has to re-resolve records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Invite token this score is keyed by (one score per token)
    pub token: String,
    /// Clamped numeric score, 0..=100
    pub score: i64,
    /// Letter grade for the score
    pub grade: Grade,
    /// Component breakdown
    pub breakdown: ScoreBreakdown,
    /// Outcome classification at session end
    pub outcome: SessionOutcome,
    /// Difficulty the session was run at
    pub difficulty: Difficulty,
    /// When the session completed
    pub completed_at: DateTime<Utc>,
    /// Conference snapshot for display
    pub conference_id: String,
    pub conference_name: String,
    /// Persona snapshot for display
    pub persona_id: String,
    pub persona_name: String,
    /// Trainee snapshot for display
    pub trainee_id: Option<String>,
    pub trainee_name: Option<String>,
    pub job_title: Option<String>,
}
