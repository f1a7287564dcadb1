//! Read-only record provider traits.

use super::model::{ConferenceRecord, PersonaRecord, TraineeRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Read-only lookups for persona records.
#[async_trait]
pub trait PersonaProvider: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<PersonaRecord>>;
    async fn list_all(&self) -> Result<Vec<PersonaRecord>>;
}

/// Read-only lookups for conference records.
#[async_trait]
pub trait ConferenceProvider: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<ConferenceRecord>>;
    async fn list_all(&self) -> Result<Vec<ConferenceRecord>>;
}

/// Read-only lookups for trainee records.
#[async_trait]
pub trait TraineeProvider: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<TraineeRecord>>;
    async fn list_all(&self) -> Result<Vec<TraineeRecord>>;
}
