//! Interaction layer for Parley.
//!
//! Implementations of the core provider seams: a deterministic scripted
//! responder/enrichment provider, an HTTP agent over an OpenAI-compatible
//! chat API, the shared rule-based turn classifier, and prompt templates.

pub mod classifier;
pub mod http_agent;
pub mod prompts;
pub mod scripted;

pub use classifier::classify_turn;
pub use http_agent::{ChatApiConfig, HttpEnrichmentProvider, HttpPersonaAgent};
pub use scripted::{ScriptedEnrichmentProvider, ScriptedResponder};
