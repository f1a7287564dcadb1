//! Evaluation-question detection.
//!
//! Mid-funnel "evaluation questions" ("how hard is the rollout?", "what's
//! the learning curve?") read like exit or commitment intent to a naive
//! classifier. This module provides the pure check used to suppress that
//! false positive: any pattern match means the utterance is a qualifying
//! question, not a completion trigger.

/// Fixed, extensible set of substrings that mark an utterance as a
/// mid-funnel evaluation question.
///
/// Matching is unordered: any single match suppresses, and no precedence
/// between patterns exists. Patterns are matched against normalized text
/// (see [`normalize`]).
const EVALUATION_PATTERNS: &[&str] = &[
    "rollout",
    "roll out",
    "bandwidth",
    "learning curve",
    "onboarding",
    "integration effort",
    "migration",
    "how long to implement",
    "how much effort",
    "training required",
    "who maintains",
    "support model",
    "security review",
    "procurement",
];

/// Normalizes free text for pattern matching: lowercase, non-alphanumeric
/// characters replaced by spaces, whitespace runs collapsed to one space.
fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns whether an attendee utterance is a mid-funnel evaluation
/// question rather than exit or commitment intent.
///
/// Pure function: no state, no side effects. False positives here must
/// never suppress genuine forward progress, and false negatives must never
/// cause a premature outcome trigger, so callers apply this only to
/// completion decisions.
pub fn is_evaluation_question(text: &str) -> bool {
    let normalized = normalize(text);
    EVALUATION_PATTERNS
        .iter()
        .any(|pattern| normalized.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollout_question_is_evaluation() {
        assert!(is_evaluation_question("How much effort is the rollout?"));
    }

    #[test]
    fn test_demo_commitment_is_not_evaluation() {
        assert!(!is_evaluation_question("Sounds good, let's do a demo"));
    }

    #[test]
    fn test_normalization_strips_punctuation_and_case() {
        assert!(is_evaluation_question("What's the LEARNING-CURVE like?!"));
        assert!(is_evaluation_question("  bandwidth,   really?  "));
    }

    #[test]
    fn test_empty_and_unrelated_text() {
        assert!(!is_evaluation_question(""));
        assert!(!is_evaluation_question("The coffee here is excellent."));
    }

    #[test]
    fn test_any_match_suppresses() {
        // Two patterns present; behavior identical to a single match.
        assert!(is_evaluation_question(
            "Do we have bandwidth for the rollout this quarter?"
        ));
    }
}
