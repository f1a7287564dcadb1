//! Deterministic scoring of finished sessions.
//!
//! The engine consumes a finalized session and produces a numeric score,
//! letter grade, and structured breakdown. Given identical session content
//! (transcript, state history, violations, final state) the computation is
//! deterministic; there is no hidden randomness.

use chrono::{DateTime, Utc};

use super::model::{Grade, ScoreBreakdown, ScoreRecord};
use crate::session::{Session, SessionOutcome};

/// Points awarded per recorded forward transition (max four transitions).
const POINTS_PER_TRANSITION: i64 = 15;
/// Bonus when the session ends in `DEMO_READY`.
const DEMO_READY_BONUS: i64 = 25;
/// Bonus when the session ends in `DEFERRED_INTEREST`.
const DEFERRED_INTEREST_BONUS: i64 = 10;
/// Penalty per recorded violation.
const VIOLATION_PENALTY: i64 = 10;
/// Bonus when the conversation lasted between 3 and 20 minutes.
const DURATION_BONUS: i64 = 15;
const DURATION_WINDOW_MIN_SECS: i64 = 3 * 60;
const DURATION_WINDOW_MAX_SECS: i64 = 20 * 60;

/// Lower and upper bounds of the reportable score range.
///
/// Sessions with violations exceeding funnel progress can sum negative;
/// the total is clamped to this range rather than reported raw. A
/// zero-transition session lands at the floor, never an error.
pub const SCORE_FLOOR: i64 = 0;
pub const SCORE_CEILING: i64 = 100;

/// Display metadata attached to a score, resolved by the caller.
#[derive(Debug, Clone, Default)]
pub struct ScoreContext {
    pub conference_id: String,
    pub conference_name: String,
    pub persona_id: String,
    pub persona_name: String,
    pub trainee_id: Option<String>,
    pub trainee_name: Option<String>,
    pub job_title: Option<String>,
}

/// Session duration in seconds, anchored to the last transcript message.
///
/// Using transcript content instead of a wall clock keeps re-computation
/// deterministic. A session with no messages has zero duration.
fn session_duration_secs(session: &Session) -> i64 {
    session
        .transcript
        .last()
        .map(|last| (last.timestamp - session.started_at).num_seconds().max(0))
        .unwrap_or(0)
}

/// Scores a finalized session.
///
/// The breakdown reflects funnel progress (15 points per transition),
/// the terminal outcome bonus (25 / 10 / 0), violation penalties (-10
/// each), and a duration signal (+15 inside the 3-20 minute window). The
/// total is clamped to `SCORE_FLOOR..=SCORE_CEILING`.
pub fn score_session(
    session: &Session,
    token: impl Into<String>,
    context: ScoreContext,
    completed_at: DateTime<Utc>,
) -> ScoreRecord {
    let outcome = SessionOutcome::from_final_state(session.current_state);

    let transitions = session.state_history.len() as i64;
    let funnel_progress = transitions * POINTS_PER_TRANSITION;

    let outcome_bonus = match outcome {
        SessionOutcome::DemoReady => DEMO_READY_BONUS,
        SessionOutcome::DeferredInterest => DEFERRED_INTEREST_BONUS,
        SessionOutcome::PoliteExit => 0,
    };

    let violation_penalty = -(session.violations.len() as i64) * VIOLATION_PENALTY;

    let duration_secs = session_duration_secs(session);
    let duration_bonus =
        if (DURATION_WINDOW_MIN_SECS..=DURATION_WINDOW_MAX_SECS).contains(&duration_secs) {
            DURATION_BONUS
        } else {
            0
        };

    let raw_total = funnel_progress + outcome_bonus + violation_penalty + duration_bonus;
    let score = raw_total.clamp(SCORE_FLOOR, SCORE_CEILING);

    ScoreRecord {
        token: token.into(),
        score,
        grade: Grade::from_score(score),
        breakdown: ScoreBreakdown {
            states_reached: session.current_state.index() + 1,
            funnel_progress,
            outcome_bonus,
            violation_penalty,
            duration_bonus,
            raw_total,
        },
        outcome,
        difficulty: session.kickoff.difficulty,
        completed_at,
        conference_id: context.conference_id,
        conference_name: context.conference_name,
        persona_id: context.persona_id,
        persona_name: context.persona_name,
        trainee_id: context.trainee_id,
        trainee_name: context.trainee_name,
        job_title: context.job_title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{
        Difficulty, FunnelStateMachine, MessageRole, Session, SessionKickoff, TurnAssessment,
    };
    use chrono::Duration;

    fn session() -> Session {
        Session::start(SessionKickoff {
            persona_id: "persona-1".to_string(),
            conference_id: "conf-1".to_string(),
            difficulty: Difficulty::Medium,
            enrichment: None,
            trainee: None,
        })
    }

    fn advance(session: &mut Session, times: usize) {
        for _ in 0..times {
            FunnelStateMachine::apply(session, &TurnAssessment::advance());
        }
    }

    #[test]
    fn test_zero_transition_session_hits_floor_not_error() {
        let mut s = session();
        s.close();
        let record = score_session(&s, "tok-1", ScoreContext::default(), Utc::now());

        assert_eq!(record.score, 0);
        assert_eq!(record.grade, Grade::F);
        assert_eq!(record.breakdown.states_reached, 1);
        assert_eq!(record.breakdown.funnel_progress, 0);
    }

    #[test]
    fn test_full_funnel_with_good_duration_is_grade_a() {
        let mut s = session();
        advance(&mut s, 4);
        s.append_message(MessageRole::Trainee, "Shall we set up a demo?");
        // Place the last message 5 minutes in, inside the duration window.
        s.transcript.last_mut().unwrap().timestamp = s.started_at + Duration::minutes(5);
        s.close();

        let record = score_session(&s, "tok-2", ScoreContext::default(), Utc::now());
        // 4 * 15 + 25 + 15 = 100
        assert_eq!(record.score, 100);
        assert_eq!(record.grade, Grade::A);
        assert_eq!(record.breakdown.outcome_bonus, 25);
        assert_eq!(record.breakdown.duration_bonus, 15);
    }

    #[test]
    fn test_violations_exceeding_progress_clamp_to_floor() {
        let mut s = session();
        for i in 0..7 {
            FunnelStateMachine::apply(
                &mut s,
                &TurnAssessment::violation(format!("early pitch #{i}")),
            );
        }
        s.close();

        let record = score_session(&s, "tok-3", ScoreContext::default(), Utc::now());
        assert!(record.breakdown.raw_total < 0);
        assert_eq!(record.score, SCORE_FLOOR);
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let mut s = session();
        advance(&mut s, 2);
        s.append_message(MessageRole::Attendee, "Interesting, tell me more.");
        s.close();

        let completed_at = Utc::now();
        let a = score_session(&s, "tok-4", ScoreContext::default(), completed_at);
        let b = score_session(&s, "tok-4", ScoreContext::default(), completed_at);
        assert_eq!(a, b);
    }

    #[test]
    fn test_deferred_interest_bonus_applied() {
        let mut s = session();
        advance(&mut s, 3);
        s.close();

        let record = score_session(&s, "tok-5", ScoreContext::default(), Utc::now());
        assert_eq!(record.outcome, SessionOutcome::DeferredInterest);
        // 3 * 15 + 10 = 55
        assert_eq!(record.score, 55);
        assert_eq!(record.grade, Grade::F);
    }

    #[test]
    fn test_grade_boundaries_are_monotonic_steps() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(80), Grade::B);
        assert_eq!(Grade::from_score(79), Grade::C);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(69), Grade::D);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }
}
