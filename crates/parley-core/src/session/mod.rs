//! Session domain module.
//!
//! This module contains the session entity, the discovery-funnel state
//! machine, transcript message types, and the session repository trait.
//!
//! # Module Structure
//!
//! - `model`: Core session domain models (`Session`, `SessionKickoff`, ...)
//! - `message`: Transcript message types
//! - `funnel`: Funnel states, outcome mapping, and progression policy
//! - `repository`: Repository trait for session persistence

mod funnel;
mod message;
mod model;
mod repository;

// Re-export public API
pub use funnel::{
    FunnelState, FunnelStateMachine, SessionOutcome, StateTransition, TurnAssessment,
    TurnEffect, TurnSignal,
};
pub use message::{MessageRole, TranscriptMessage};
pub use model::{Difficulty, Session, SessionKickoff, TraineeIdentity};
pub use repository::SessionRepository;
