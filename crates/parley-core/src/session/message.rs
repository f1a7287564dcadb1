//! Transcript message types.
//!
//! This module contains types for representing messages in a roleplay
//! transcript, including roles and message content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a roleplay transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// System-generated message (e.g., end-of-session feedback).
    System,
    /// Message from the trainee running the discovery call.
    Trainee,
    /// Message from the simulated conference attendee.
    Attendee,
}

/// A single message in a session transcript.
///
/// Each message has a role (system, trainee, or attendee), text content,
/// and a timestamp indicating when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Unique message identifier (UUID format)
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The text content of the message.
    pub text: String,
    /// Timestamp when the message was created (RFC 3339).
    pub timestamp: DateTime<Utc>,
}

impl TranscriptMessage {
    /// Creates a new message with a fresh UUID and the current timestamp.
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}
