//! Discovery funnel states and progression policy.
//!
//! The funnel is a strictly ordered sequence of conversation stages. The
//! state machine here owns progression only: given a classification of the
//! trainee's latest utterance it advances, holds, or records a violation.
//! It never inspects message text itself; linguistic work belongs to the
//! persona responder.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use super::model::Session;

/// One of the five ordered conversation stages a session progresses through.
///
/// Progression is monotonic forward-only along this order; there is no
/// backward transition. The variant order is load-bearing: `index()` and
/// the monotonicity checks rely on declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FunnelState {
    Icebreaker,
    Exploration,
    PainDiscovery,
    SolutionFraming,
    Outcome,
}

impl FunnelState {
    /// Position of this state in the funnel order (0-based).
    pub fn index(self) -> usize {
        match self {
            FunnelState::Icebreaker => 0,
            FunnelState::Exploration => 1,
            FunnelState::PainDiscovery => 2,
            FunnelState::SolutionFraming => 3,
            FunnelState::Outcome => 4,
        }
    }

    /// The next state in the funnel, or `None` at the terminal stage.
    pub fn next(self) -> Option<FunnelState> {
        match self {
            FunnelState::Icebreaker => Some(FunnelState::Exploration),
            FunnelState::Exploration => Some(FunnelState::PainDiscovery),
            FunnelState::PainDiscovery => Some(FunnelState::SolutionFraming),
            FunnelState::SolutionFraming => Some(FunnelState::Outcome),
            FunnelState::Outcome => None,
        }
    }

    /// Total number of funnel states.
    pub const COUNT: usize = 5;

    /// The state every session starts in.
    pub fn initial() -> FunnelState {
        FunnelState::Icebreaker
    }
}

/// Classification of a finished session, derived purely from the final
/// funnel state at termination.
///
/// The mapping is a fixed lookup and must be reproduced exactly:
/// `Outcome -> DemoReady`, `SolutionFraming -> DeferredInterest`,
/// anything else -> `PoliteExit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionOutcome {
    DemoReady,
    DeferredInterest,
    PoliteExit,
}

impl SessionOutcome {
    /// Maps a final funnel state to its outcome classification.
    pub fn from_final_state(state: FunnelState) -> SessionOutcome {
        match state {
            FunnelState::Outcome => SessionOutcome::DemoReady,
            FunnelState::SolutionFraming => SessionOutcome::DeferredInterest,
            _ => SessionOutcome::PoliteExit,
        }
    }
}

/// A recorded funnel transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: FunnelState,
    pub to: FunnelState,
}

/// Whether the trainee's latest utterance warrants funnel progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnSignal {
    /// Stay in the current state.
    Hold,
    /// Advance one state forward.
    Advance,
}

/// Classification of a single trainee utterance, produced by the persona
/// responder (rule-based or LLM-side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAssessment {
    /// Whether to advance or hold.
    pub signal: TurnSignal,
    /// A discipline breach to record, if any (e.g., an early product pitch).
    /// Violations do not end the session; they penalize scoring.
    pub violation: Option<String>,
}

impl TurnAssessment {
    /// An assessment that holds the current state with no violation.
    pub fn hold() -> Self {
        Self {
            signal: TurnSignal::Hold,
            violation: None,
        }
    }

    /// An assessment that advances one state with no violation.
    pub fn advance() -> Self {
        Self {
            signal: TurnSignal::Advance,
            violation: None,
        }
    }

    /// An assessment that holds and records a violation.
    pub fn violation(description: impl Into<String>) -> Self {
        Self {
            signal: TurnSignal::Hold,
            violation: Some(description.into()),
        }
    }
}

/// The effect a single assessment had on a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnEffect {
    /// The transition taken this turn, if the session advanced.
    pub transition: Option<StateTransition>,
    /// Whether a violation was recorded this turn.
    pub violation_recorded: bool,
}

/// Progression policy for the discovery funnel.
///
/// Applies a [`TurnAssessment`] to a session: advances at most one state
/// forward per turn, appends the `{from, to}` transition to the session's
/// state history, and records any violation. Assessments against an ended
/// session are ignored.
pub struct FunnelStateMachine;

impl FunnelStateMachine {
    /// Applies an assessment to the session and returns its effect.
    pub fn apply(session: &mut Session, assessment: &TurnAssessment) -> TurnEffect {
        if !session.active {
            return TurnEffect::default();
        }

        let mut effect = TurnEffect::default();

        if let Some(description) = &assessment.violation {
            session.violations.push(description.clone());
            effect.violation_recorded = true;
        }

        if assessment.signal == TurnSignal::Advance {
            if let Some(next) = session.current_state.next() {
                let transition = StateTransition {
                    from: session.current_state,
                    to: next,
                };
                session.state_history.push(transition);
                session.current_state = next;
                effect.transition = Some(transition);
            }
        }

        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::{Difficulty, Session, SessionKickoff};
    use strum::IntoEnumIterator;

    fn test_session() -> Session {
        Session::start(SessionKickoff {
            persona_id: "persona-1".to_string(),
            conference_id: "conf-1".to_string(),
            difficulty: Difficulty::Medium,
            enrichment: None,
            trainee: None,
        })
    }

    #[test]
    fn test_funnel_order_is_strictly_increasing() {
        let states: Vec<FunnelState> = FunnelState::iter().collect();
        assert_eq!(states.len(), FunnelState::COUNT);
        for pair in states.windows(2) {
            assert!(pair[0].index() < pair[1].index());
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(FunnelState::Outcome.next(), None);
    }

    #[test]
    fn test_outcome_mapping_is_fixed() {
        assert_eq!(
            SessionOutcome::from_final_state(FunnelState::Outcome),
            SessionOutcome::DemoReady
        );
        assert_eq!(
            SessionOutcome::from_final_state(FunnelState::SolutionFraming),
            SessionOutcome::DeferredInterest
        );
        for state in [
            FunnelState::Icebreaker,
            FunnelState::Exploration,
            FunnelState::PainDiscovery,
        ] {
            assert_eq!(
                SessionOutcome::from_final_state(state),
                SessionOutcome::PoliteExit
            );
        }
    }

    #[test]
    fn test_advance_appends_history_and_moves_state() {
        let mut session = test_session();
        let effect = FunnelStateMachine::apply(&mut session, &TurnAssessment::advance());

        assert_eq!(
            effect.transition,
            Some(StateTransition {
                from: FunnelState::Icebreaker,
                to: FunnelState::Exploration,
            })
        );
        assert_eq!(session.current_state, FunnelState::Exploration);
        assert_eq!(session.state_history.len(), 1);
    }

    #[test]
    fn test_advance_is_monotonic_and_saturates_at_outcome() {
        let mut session = test_session();
        for _ in 0..10 {
            FunnelStateMachine::apply(&mut session, &TurnAssessment::advance());
        }

        assert_eq!(session.current_state, FunnelState::Outcome);
        // Four forward transitions exist in a five-state funnel.
        assert_eq!(session.state_history.len(), 4);
        for transition in &session.state_history {
            assert!(transition.to.index() > transition.from.index());
        }
    }

    #[test]
    fn test_hold_leaves_session_untouched() {
        let mut session = test_session();
        let effect = FunnelStateMachine::apply(&mut session, &TurnAssessment::hold());

        assert_eq!(effect, TurnEffect::default());
        assert_eq!(session.current_state, FunnelState::Icebreaker);
        assert!(session.state_history.is_empty());
    }

    #[test]
    fn test_violation_recorded_without_advancing() {
        let mut session = test_session();
        let effect = FunnelStateMachine::apply(
            &mut session,
            &TurnAssessment::violation("pitched product pricing during icebreaker"),
        );

        assert!(effect.violation_recorded);
        assert!(effect.transition.is_none());
        assert_eq!(session.violations.len(), 1);
        assert_eq!(session.current_state, FunnelState::Icebreaker);
    }

    #[test]
    fn test_ended_session_ignores_assessments() {
        let mut session = test_session();
        session.active = false;

        let effect = FunnelStateMachine::apply(&mut session, &TurnAssessment::advance());
        assert_eq!(effect, TurnEffect::default());
        assert_eq!(session.current_state, FunnelState::Icebreaker);
    }
}
