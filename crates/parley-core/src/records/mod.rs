//! Record domain module.
//!
//! Read-only persona/conference/trainee records and their provider traits.

mod model;
mod provider;

// Re-export public API
pub use model::{ConferenceRecord, PersonaRecord, TraineeRecord};
pub use provider::{ConferenceProvider, PersonaProvider, TraineeProvider};
