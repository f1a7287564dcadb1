//! Read-only record models.
//!
//! Personas, conferences, and trainees are thin CRUD records owned by an
//! external collaborator; the core only reads them to resolve kickoff
//! parameters and display metadata.

use serde::{Deserialize, Serialize};

use crate::session::Difficulty;

/// A simulated conference attendee persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaRecord {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name of the attendee
    pub name: String,
    /// Job title shown on leaderboards and prompts
    pub job_title: String,
    /// Disposition description steering the simulated conversation
    pub disposition: String,
    /// Difficulty this persona defaults to when the kickoff names none
    #[serde(default)]
    pub default_difficulty: Difficulty,
}

/// A conference an attendee persona is encountered at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceRecord {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name of the conference
    pub name: String,
    /// Industry the conference serves
    pub industry: String,
}

/// A trainee running discovery sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraineeRecord {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name
    pub name: String,
    /// Job title for leaderboard display
    #[serde(default)]
    pub job_title: Option<String>,
}
