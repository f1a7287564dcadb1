//! Persona responder trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::{Session, TurnAssessment};

/// One attendee turn: the simulated reply plus the progression assessment
/// for the trainee utterance that prompted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeTurn {
    /// The attendee's reply text
    pub reply: String,
    /// Classification of the trainee's utterance for the state machine
    pub assessment: TurnAssessment,
}

/// External capability that produces the attendee side of a conversation.
///
/// All linguistic work lives behind this seam; the funnel state machine
/// consumes only the returned [`TurnAssessment`]. Implementations range
/// from the deterministic scripted responder to LLM-backed agents.
#[async_trait]
pub trait PersonaResponder: Send + Sync {
    /// Produces the attendee reply and assessment for the latest trainee
    /// utterance, given the full session context.
    async fn respond(&self, session: &Session, trainee_utterance: &str) -> Result<AttendeeTurn>;
}
