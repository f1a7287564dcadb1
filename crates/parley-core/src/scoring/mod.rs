//! Scoring domain module.
//!
//! # Module Structure
//!
//! - `model`: Score domain models (`ScoreRecord`, `Grade`, `ScoreBreakdown`)
//! - `engine`: Deterministic score computation
//! - `repository`: Repository trait for score persistence

mod engine;
mod model;
mod repository;

// Re-export public API
pub use engine::{score_session, ScoreContext, SCORE_CEILING, SCORE_FLOOR};
pub use model::{Grade, ScoreBreakdown, ScoreRecord};
pub use repository::ScoreRepository;
