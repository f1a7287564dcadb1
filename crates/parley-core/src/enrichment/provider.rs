//! Enrichment provider trait.

use super::model::{EnrichmentInput, EnrichmentOutput};
use crate::error::Result;
use async_trait::async_trait;

/// An opaque external capability that generates attendee-background text.
///
/// Implementations may fail or hang; callers on the background warm-up
/// path race this against a deadline and discard the loser's result.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Generates a background profile for the given context.
    async fn enrich(&self, input: &EnrichmentInput) -> Result<EnrichmentOutput>;
}
