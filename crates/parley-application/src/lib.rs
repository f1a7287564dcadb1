//! Application layer for Parley.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers to implement application-level
//! business logic: the session lifecycle, the enrichment cache with its
//! bounded warm-up, and leaderboard views.

pub mod enrichment_service;
pub mod leaderboard_usecase;
pub mod session_usecase;

pub use enrichment_service::{EnrichmentService, ENSURE_TIMEOUT};
pub use leaderboard_usecase::LeaderboardUseCase;
pub use session_usecase::{SessionClose, SessionUseCase, StartSessionRequest, TurnOutcome};
