//! Core domain library for Parley, a sales-discovery roleplay trainer.
//!
//! A trainee converses with a simulated conference attendee through a
//! fixed discovery funnel; the finished session is scored and ranked. This
//! crate holds the domain: the funnel state machine, the evaluation-
//! question check, the scoring engine, the leaderboard aggregator, the
//! enrichment cache contracts, and the repository/provider seams the
//! infrastructure and interaction crates implement.

pub mod enrichment;
pub mod error;
pub mod evaluator;
pub mod leaderboard;
pub mod records;
pub mod responder;
pub mod scoring;
pub mod session;

// Re-export common error type
pub use error::{ParleyError, Result};
pub use responder::{AttendeeTurn, PersonaResponder};
