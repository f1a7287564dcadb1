//! Rule-based turn classification.
//!
//! Maps a trainee utterance to a [`TurnAssessment`] for the funnel state
//! machine: per-state advance cues plus a disallowed product-keyword check
//! that flags an early pitch as a violation. Both the scripted responder
//! and the HTTP agent use this classifier; the LLM only produces reply
//! text, never progression decisions.

use parley_core::session::{FunnelState, TurnAssessment};

/// Product keywords the trainee may not lead with before the funnel has
/// reached `SOLUTION_FRAMING`. Using one earlier records a violation.
const PRODUCT_KEYWORDS: &[&str] = &[
    "pricing",
    "price",
    "discount",
    "license",
    "contract",
    "sign up",
    "buy now",
    "our product",
];

/// Advance cues out of `ICEBREAKER`: the trainee opens up the attendee's
/// work context.
const EXPLORATION_CUES: &[&str] = &[
    "what do you do",
    "your role",
    "what brings you",
    "working on",
    "your team",
    "tell me about",
];

/// Advance cues out of `EXPLORATION`: the trainee probes for pain.
const PAIN_CUES: &[&str] = &[
    "challenge",
    "pain",
    "frustrat",
    "problem",
    "struggle",
    "biggest issue",
    "slow you down",
];

/// Advance cues out of `PAIN_DISCOVERY`: the trainee frames a solution.
const FRAMING_CUES: &[&str] = &[
    "what if",
    "imagine",
    "solve",
    "address that",
    "help with",
    "approach to",
];

/// Advance cues out of `SOLUTION_FRAMING`: the trainee asks for a concrete
/// next step.
const COMMIT_CUES: &[&str] = &[
    "demo",
    "next step",
    "follow up",
    "meeting",
    "connect you",
    "calendar",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Classifies a trainee utterance against the current funnel state.
pub fn classify_turn(state: FunnelState, utterance: &str) -> TurnAssessment {
    let lowered = utterance.to_lowercase();

    // Product talk before solution framing is a discipline breach. The
    // violation holds the state; it never ends the session.
    if state.index() < FunnelState::SolutionFraming.index()
        && contains_any(&lowered, PRODUCT_KEYWORDS)
    {
        return TurnAssessment::violation(format!(
            "product pitch during {state} before discovery was complete"
        ));
    }

    let cues = match state {
        FunnelState::Icebreaker => EXPLORATION_CUES,
        FunnelState::Exploration => PAIN_CUES,
        FunnelState::PainDiscovery => FRAMING_CUES,
        FunnelState::SolutionFraming => COMMIT_CUES,
        FunnelState::Outcome => return TurnAssessment::hold(),
    };

    if contains_any(&lowered, cues) {
        TurnAssessment::advance()
    } else {
        TurnAssessment::hold()
    }
}
