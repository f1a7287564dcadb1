//! Deterministic scripted providers.
//!
//! The scripted responder and enrichment provider need no network and no
//! model: replies come from fixed per-state tables and assessments from
//! the rule-based classifier. They back tests, offline demos, and any
//! deployment that wants reproducible sessions.

use async_trait::async_trait;
use parley_core::enrichment::{EnrichmentInput, EnrichmentOutput, EnrichmentProvider};
use parley_core::error::Result;
use parley_core::responder::{AttendeeTurn, PersonaResponder};
use parley_core::session::{Difficulty, FunnelState, Session, TurnSignal};

use crate::classifier::classify_turn;

const PROVIDER_NAME: &str = "scripted";

/// Canned attendee reply for a state, picked after the assessment so an
/// advancing turn answers from the state being entered.
fn reply_for(state: FunnelState, difficulty: Difficulty) -> &'static str {
    match (state, difficulty) {
        (FunnelState::Icebreaker, Difficulty::Hard) => "Hi. Quite a crowd here.",
        (FunnelState::Icebreaker, _) => {
            "Hey! Enjoying the conference so far, the keynote was great."
        }
        (FunnelState::Exploration, Difficulty::Hard) => {
            "I run an engineering group. Why do you ask?"
        }
        (FunnelState::Exploration, _) => {
            "I lead a platform team; we're here scouting tooling for next year."
        }
        (FunnelState::PainDiscovery, Difficulty::Hard) => {
            "There are some rough edges, sure. Nothing we can't handle."
        }
        (FunnelState::PainDiscovery, _) => {
            "Honestly, our release process is the sore spot; every deploy is a fire drill."
        }
        (FunnelState::SolutionFraming, Difficulty::Hard) => {
            "Maybe. I'd need to see how that survives our change-management process."
        }
        (FunnelState::SolutionFraming, _) => {
            "That would genuinely help; walk me through how that would look for us."
        }
        (FunnelState::Outcome, _) => {
            "Alright, send over an invite and I'll bring our infrastructure lead."
        }
    }
}

/// Deterministic rule-based persona responder.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponder;

impl ScriptedResponder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PersonaResponder for ScriptedResponder {
    async fn respond(&self, session: &Session, trainee_utterance: &str) -> Result<AttendeeTurn> {
        let assessment = classify_turn(session.current_state, trainee_utterance);

        let reply_state = if assessment.signal == TurnSignal::Advance {
            session.current_state.next().unwrap_or(session.current_state)
        } else {
            session.current_state
        };

        Ok(AttendeeTurn {
            reply: reply_for(reply_state, session.kickoff.difficulty).to_string(),
            assessment,
        })
    }
}

/// Deterministic enrichment provider composing a profile from the input
/// context. Useful wherever generation must be instant and reproducible.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEnrichmentProvider;

impl ScriptedEnrichmentProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnrichmentProvider for ScriptedEnrichmentProvider {
    async fn enrich(&self, input: &EnrichmentInput) -> Result<EnrichmentOutput> {
        let text = format!(
            "{persona} is attending {conference}. {context} They are comparing \
             vendors this quarter and respond best to questions about their \
             team's day-to-day pain.",
            persona = input.persona_name,
            conference = input.conference_name,
            context = input.attendee_context,
        );
        Ok(EnrichmentOutput {
            text,
            provider: PROVIDER_NAME.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::session::{SessionKickoff, TurnSignal};

    fn session(difficulty: Difficulty) -> Session {
        Session::start(SessionKickoff {
            persona_id: "persona-1".to_string(),
            conference_id: "conf-1".to_string(),
            difficulty,
            enrichment: None,
            trainee: None,
        })
    }

    #[tokio::test]
    async fn test_advancing_turn_replies_from_entered_state() {
        let responder = ScriptedResponder::new();
        let session = session(Difficulty::Medium);

        let turn = responder
            .respond(&session, "So what brings you to the conference?")
            .await
            .unwrap();

        assert_eq!(turn.assessment.signal, TurnSignal::Advance);
        // Reply comes from Exploration, the state being entered.
        assert!(turn.reply.contains("platform team"));
    }

    #[tokio::test]
    async fn test_holding_turn_replies_from_current_state() {
        let responder = ScriptedResponder::new();
        let session = session(Difficulty::Medium);

        let turn = responder.respond(&session, "Nice badge!").await.unwrap();

        assert_eq!(turn.assessment.signal, TurnSignal::Hold);
        assert!(turn.reply.contains("keynote"));
    }

    #[tokio::test]
    async fn test_scripted_enrichment_is_deterministic() {
        let provider = ScriptedEnrichmentProvider::new();
        let input = EnrichmentInput {
            conference_id: "conf-1".to_string(),
            conference_name: "DevSummit".to_string(),
            persona_id: "persona-1".to_string(),
            persona_name: "Avery Chen".to_string(),
            attendee_context: "VP of Engineering.".to_string(),
        };

        let a = provider.enrich(&input).await.unwrap();
        let b = provider.enrich(&input).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.provider, "scripted");
        assert!(a.text.contains("Avery Chen"));
    }
}
