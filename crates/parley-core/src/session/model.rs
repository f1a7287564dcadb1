//! Session domain model.
//!
//! This module contains the core Session entity that represents one
//! sales-discovery roleplay run in the application's domain layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

use super::funnel::{FunnelState, StateTransition};
use super::message::{MessageRole, TranscriptMessage};

/// Difficulty setting for a roleplay session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Identity of the trainee running a session, when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineeIdentity {
    /// Trainee record id
    pub id: String,
    /// Display name
    pub name: String,
    /// Job title for leaderboard display
    pub job_title: Option<String>,
}

/// Immutable snapshot of the parameters a session was started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKickoff {
    /// Persona the attendee is simulated from
    pub persona_id: String,
    /// Conference the attendee context belongs to
    pub conference_id: String,
    /// Difficulty setting
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Cached attendee-background enrichment text, if available at start
    #[serde(default)]
    pub enrichment: Option<String>,
    /// Trainee identity, if resolved at start
    #[serde(default)]
    pub trainee: Option<TraineeIdentity>,
}

/// Represents one roleplay session in the domain layer.
///
/// A session contains:
/// - The ordered transcript (system, trainee, and attendee messages)
/// - The current funnel state and the ordered transition history
/// - Recorded violations (discipline breaches that penalize scoring)
/// - The kickoff snapshot it was started with
/// - Liveness (`active`) and the start timestamp
///
/// Invariants:
/// - `current_state` always equals the `to` of the last `state_history`
///   entry, or the initial state when the history is empty.
/// - `active` transitions true -> false exactly once; a finalized session
///   is immutable except for trainer feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Ordered conversation transcript
    pub transcript: Vec<TranscriptMessage>,
    /// Current funnel state
    pub current_state: FunnelState,
    /// Ordered forward transitions taken so far
    pub state_history: Vec<StateTransition>,
    /// Ordered violation descriptions
    pub violations: Vec<String>,
    /// Whether the session is still running
    pub active: bool,
    /// Timestamp when the session was started
    pub started_at: DateTime<Utc>,
    /// Parameters the session was started with
    pub kickoff: SessionKickoff,
    /// Free-text trainer feedback, the only post-finalize mutation
    #[serde(default)]
    pub trainer_feedback: Option<String>,
}

impl Session {
    /// Starts a new active session in the initial funnel state.
    pub fn start(kickoff: SessionKickoff) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transcript: Vec::new(),
            current_state: FunnelState::initial(),
            state_history: Vec::new(),
            violations: Vec::new(),
            active: true,
            started_at: Utc::now(),
            kickoff,
            trainer_feedback: None,
        }
    }

    /// Appends a message to the transcript and returns a reference to it.
    pub fn append_message(
        &mut self,
        role: MessageRole,
        text: impl Into<String>,
    ) -> &TranscriptMessage {
        self.transcript.push(TranscriptMessage::new(role, text));
        // Safe to unwrap because we just pushed an element
        self.transcript.last().unwrap()
    }

    /// Finalizes the session.
    ///
    /// Returns `true` on the first call and `false` on every subsequent
    /// call; repeated closes never un-finalize or mutate the session.
    pub fn close(&mut self) -> bool {
        if self.active {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Elapsed time since the session started, up to `now`.
    pub fn duration_until(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.started_at
    }

    /// Checks the state/history invariant: `current_state` equals the last
    /// transition's target, or the initial state if the history is empty.
    pub fn is_consistent(&self) -> bool {
        match self.state_history.last() {
            Some(last) => self.current_state == last.to,
            None => self.current_state == FunnelState::initial(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kickoff() -> SessionKickoff {
        SessionKickoff {
            persona_id: "persona-1".to_string(),
            conference_id: "conf-1".to_string(),
            difficulty: Difficulty::Easy,
            enrichment: None,
            trainee: None,
        }
    }

    #[test]
    fn test_start_session_is_active_and_consistent() {
        let session = Session::start(kickoff());
        assert!(session.active);
        assert_eq!(session.current_state, FunnelState::Icebreaker);
        assert!(session.is_consistent());
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_close_is_idempotent_on_active() {
        let mut session = Session::start(kickoff());
        assert!(session.close());
        assert!(!session.active);
        // Second close must not report a fresh finalization.
        assert!(!session.close());
        assert!(!session.active);
    }

    #[test]
    fn test_append_message_grows_transcript_in_order() {
        let mut session = Session::start(kickoff());
        session.append_message(MessageRole::Trainee, "Hi, enjoying the conference?");
        session.append_message(MessageRole::Attendee, "Loving the keynote so far.");

        assert_eq!(session.transcript.len(), 2);
        assert_eq!(session.transcript[0].role, MessageRole::Trainee);
        assert_eq!(session.transcript[1].role, MessageRole::Attendee);
        assert_ne!(session.transcript[0].id, session.transcript[1].id);
    }
}
