//! Session use case implementation.
//!
//! Orchestrates one roleplay session across the domain seams: record
//! validation at kickoff, turn application against the funnel state
//! machine, evaluation-question suppression, and scoring plus leaderboard
//! projection at session end.

use std::sync::Arc;

use chrono::Utc;
use parley_core::enrichment::{EnrichmentInput, EnrichmentKey};
use parley_core::error::{ParleyError, Result};
use parley_core::evaluator::is_evaluation_question;
use parley_core::leaderboard::{LeaderboardEntry, LeaderboardRepository};
use parley_core::records::{ConferenceProvider, PersonaProvider, TraineeProvider};
use parley_core::responder::PersonaResponder;
use parley_core::scoring::{score_session, ScoreContext, ScoreRecord, ScoreRepository};
use parley_core::session::{
    Difficulty, FunnelState, FunnelStateMachine, MessageRole, Session, SessionKickoff,
    SessionOutcome, SessionRepository, TraineeIdentity, TurnSignal,
};

use crate::enrichment_service::EnrichmentService;

/// Parameters for starting a session.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct StartSessionRequest {
    pub persona_id: String,
    pub conference_id: String,
    /// Overrides the persona's default difficulty when set
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Trainee running the session, when known
    #[serde(default)]
    pub trainee_id: Option<String>,
}

/// Result of applying one trainee turn.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TurnOutcome {
    pub session: Session,
    pub attendee_reply: String,
}

/// Result of ending a session.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionClose {
    pub outcome: SessionOutcome,
    pub feedback: String,
    /// Present when an invite token resolved the session to a score
    pub score: Option<ScoreRecord>,
}

fn feedback_for(outcome: SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::DemoReady => {
            "Strong run: the attendee committed to a demo. Review the transcript for the questions that unlocked each stage."
        }
        SessionOutcome::DeferredInterest => {
            "The attendee is interested but uncommitted. Work on converting framed value into a concrete next step."
        }
        SessionOutcome::PoliteExit => {
            "The conversation ended before solution framing. Revisit your discovery questions for the earlier stages."
        }
    }
}

/// Use case for the full session lifecycle.
///
/// All collaborators are injected as `Arc<dyn ...>` seams so transports
/// and tests can wire any store/provider combination.
pub struct SessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
    score_repository: Arc<dyn ScoreRepository>,
    leaderboard_repository: Arc<dyn LeaderboardRepository>,
    persona_provider: Arc<dyn PersonaProvider>,
    conference_provider: Arc<dyn ConferenceProvider>,
    trainee_provider: Arc<dyn TraineeProvider>,
    responder: Arc<dyn PersonaResponder>,
    enrichment: Arc<EnrichmentService>,
}

impl SessionUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        score_repository: Arc<dyn ScoreRepository>,
        leaderboard_repository: Arc<dyn LeaderboardRepository>,
        persona_provider: Arc<dyn PersonaProvider>,
        conference_provider: Arc<dyn ConferenceProvider>,
        trainee_provider: Arc<dyn TraineeProvider>,
        responder: Arc<dyn PersonaResponder>,
        enrichment: Arc<EnrichmentService>,
    ) -> Self {
        Self {
            session_repository,
            score_repository,
            leaderboard_repository,
            persona_provider,
            conference_provider,
            trainee_provider,
            responder,
            enrichment,
        }
    }

    /// Starts a new session.
    ///
    /// Validates the kickoff records, attaches any cached enrichment, and
    /// fires a background warm-up for the enrichment key. The warm-up is
    /// fire-and-forget: its failures are logged, never surfaced.
    pub async fn start_session(&self, request: StartSessionRequest) -> Result<Session> {
        if request.persona_id.trim().is_empty() {
            return Err(ParleyError::validation("personaId", "must not be empty"));
        }
        if request.conference_id.trim().is_empty() {
            return Err(ParleyError::validation("conferenceId", "must not be empty"));
        }

        let persona = self
            .persona_provider
            .find_by_id(&request.persona_id)
            .await?
            .ok_or_else(|| ParleyError::not_found("persona", &request.persona_id))?;
        let conference = self
            .conference_provider
            .find_by_id(&request.conference_id)
            .await?
            .ok_or_else(|| ParleyError::not_found("conference", &request.conference_id))?;

        let trainee = match &request.trainee_id {
            Some(trainee_id) => {
                let record = self
                    .trainee_provider
                    .find_by_id(trainee_id)
                    .await?
                    .ok_or_else(|| ParleyError::not_found("trainee", trainee_id))?;
                Some(TraineeIdentity {
                    id: record.id,
                    name: record.name,
                    job_title: record.job_title,
                })
            }
            None => None,
        };

        let key = EnrichmentKey::new(&conference.id, &persona.id);
        let enrichment_text = self.enrichment.get(&key).await?.map(|record| record.text);

        let session = Session::start(SessionKickoff {
            persona_id: persona.id.clone(),
            conference_id: conference.id.clone(),
            difficulty: request.difficulty.unwrap_or(persona.default_difficulty),
            enrichment: enrichment_text,
            trainee,
        });
        self.session_repository.save(&session).await?;

        // Fire-and-forget warm-up for the next session against this pair.
        let input = EnrichmentInput {
            conference_id: conference.id.clone(),
            conference_name: conference.name.clone(),
            persona_id: persona.id.clone(),
            persona_name: persona.name.clone(),
            attendee_context: format!(
                "{}, {}. {} ({})",
                persona.job_title, conference.industry, persona.disposition, conference.name
            ),
        };
        let enrichment = self.enrichment.clone();
        tokio::spawn(async move {
            let status = enrichment.ensure(&key, &input).await;
            tracing::debug!(target: "enrichment", key = %key.storage_key(), ?status, "Background warm-up finished");
        });

        Ok(session)
    }

    /// Applies one trainee turn to an active session.
    ///
    /// Appends the trainee message, obtains the attendee reply and the
    /// progression assessment, applies the funnel state machine, and
    /// persists the updated session. An attendee reply that is an
    /// evaluation question never completes the funnel: an advance into
    /// `OUTCOME` is downgraded to a hold in that case.
    pub async fn apply_turn(&self, session_id: &str, utterance: &str) -> Result<TurnOutcome> {
        if utterance.trim().is_empty() {
            return Err(ParleyError::validation("utterance", "must not be empty"));
        }

        let mut session = self
            .session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ParleyError::not_found("session", session_id))?;
        if !session.active {
            return Err(ParleyError::validation("sessionId", "session has ended"));
        }

        // The responder sees the transcript up to, not including, this
        // utterance; it receives the utterance separately.
        let turn = self.responder.respond(&session, utterance).await?;
        session.append_message(MessageRole::Trainee, utterance);
        let mut assessment = turn.assessment;

        let entering_outcome = assessment.signal == TurnSignal::Advance
            && session.current_state.next() == Some(FunnelState::Outcome);
        if entering_outcome && is_evaluation_question(&turn.reply) {
            // Qualifying question, not commitment intent: hold the funnel.
            assessment.signal = TurnSignal::Hold;
        }

        FunnelStateMachine::apply(&mut session, &assessment);
        session.append_message(MessageRole::Attendee, &turn.reply);
        self.session_repository.save(&session).await?;

        Ok(TurnOutcome {
            session,
            attendee_reply: turn.reply,
        })
    }

    /// Ends a session.
    ///
    /// Idempotent in effect on `active`: only the first call finalizes the
    /// session and appends the single system feedback message. When an
    /// invite token is supplied, the score is created once per token and
    /// projected onto the leaderboard; a repeated end with the same token
    /// returns the stored score.
    pub async fn end_session(
        &self,
        session_id: &str,
        token: Option<&str>,
    ) -> Result<SessionClose> {
        // Validate before any mutation: a rejected call must leave the
        // session untouched.
        if let Some(token) = token {
            if token.trim().is_empty() {
                return Err(ParleyError::validation("token", "must not be empty"));
            }
        }

        let mut session = self
            .session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ParleyError::not_found("session", session_id))?;

        let outcome = SessionOutcome::from_final_state(session.current_state);
        let feedback = feedback_for(outcome);

        if session.close() {
            session.append_message(MessageRole::System, feedback);
            self.session_repository.save(&session).await?;
        }

        let score = match token {
            Some(token) => Some(self.resolve_score(&session, token).await?),
            None => None,
        };

        Ok(SessionClose {
            outcome,
            feedback: feedback.to_string(),
            score,
        })
    }

    /// Computes and persists the score for a finalized session, reusing
    /// the stored record on repeated end calls with the same token.
    async fn resolve_score(&self, session: &Session, token: &str) -> Result<ScoreRecord> {
        if let Some(existing) = self.score_repository.find_by_token(token).await? {
            return Ok(existing);
        }

        let persona = self
            .persona_provider
            .find_by_id(&session.kickoff.persona_id)
            .await?;
        let conference = self
            .conference_provider
            .find_by_id(&session.kickoff.conference_id)
            .await?;

        let context = ScoreContext {
            conference_id: session.kickoff.conference_id.clone(),
            conference_name: conference
                .map(|c| c.name)
                .unwrap_or_else(|| session.kickoff.conference_id.clone()),
            persona_id: session.kickoff.persona_id.clone(),
            persona_name: persona
                .map(|p| p.name)
                .unwrap_or_else(|| session.kickoff.persona_id.clone()),
            trainee_id: session.kickoff.trainee.as_ref().map(|t| t.id.clone()),
            trainee_name: session.kickoff.trainee.as_ref().map(|t| t.name.clone()),
            job_title: session
                .kickoff
                .trainee
                .as_ref()
                .and_then(|t| t.job_title.clone()),
        };

        let record = score_session(session, token, context, Utc::now());
        self.score_repository.save(&record).await?;
        self.leaderboard_repository
            .append(&LeaderboardEntry::from(&record))
            .await?;

        Ok(record)
    }

    /// Attaches trainer feedback, the only mutation a finalized session
    /// accepts.
    pub async fn set_trainer_feedback(&self, session_id: &str, feedback: &str) -> Result<()> {
        let mut session = self
            .session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ParleyError::not_found("session", session_id))?;

        session.trainer_feedback = Some(feedback.to_string());
        self.session_repository.save(&session).await
    }
}
