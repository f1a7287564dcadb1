//! Enrichment domain models.
//!
//! An enrichment is a generated attendee-background profile, cached per
//! (conference, persona) pair. Records are write-once per key and never
//! expire; only an explicit invalidation removes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache key identifying an enrichment: one per (conference, persona) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrichmentKey {
    pub conference_id: String,
    pub persona_id: String,
}

impl EnrichmentKey {
    pub fn new(conference_id: impl Into<String>, persona_id: impl Into<String>) -> Self {
        Self {
            conference_id: conference_id.into(),
            persona_id: persona_id.into(),
        }
    }

    /// Stable storage form of the key.
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.conference_id, self.persona_id)
    }
}

/// A persisted enrichment profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    /// Generated attendee-background text
    pub text: String,
    /// Identifier of the provider that generated the text
    pub provider: String,
    /// When this record was created
    pub created_at: DateTime<Utc>,
}

/// Result of a background enrichment warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsureStatus {
    /// A record already existed; generation was short-circuited.
    Cached,
    /// Generation won the deadline race and the record was persisted.
    Fresh,
    /// The deadline won, or generation failed. Nothing was persisted and a
    /// later retry may attempt generation again.
    Pending,
}

/// Context handed to the enrichment provider for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentInput {
    pub conference_id: String,
    pub conference_name: String,
    pub persona_id: String,
    pub persona_name: String,
    /// Free-text attendee context (role, disposition, industry)
    pub attendee_context: String,
}

/// Output of one enrichment generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentOutput {
    pub text: String,
    pub provider: String,
}
