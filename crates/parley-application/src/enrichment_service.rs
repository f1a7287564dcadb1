//! Enrichment cache service.
//!
//! Memoizes generated attendee-background profiles per (conference,
//! persona) key. Two entry points with different failure contracts:
//!
//! - [`EnrichmentService::get_or_generate`] is the blocking invite-creation
//!   path: no timeout, generation failures surface as errors.
//! - [`EnrichmentService::ensure`] is the fire-and-forget warm-up path: the
//!   generation call races a fixed deadline, the loser is abandoned (its
//!   late result is discarded, never persisted), and every failure degrades
//!   to [`EnsureStatus::Pending`] so a later retry can generate again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parley_core::enrichment::{
    EnrichmentInput, EnrichmentKey, EnrichmentProvider, EnrichmentRecord, EnrichmentRepository,
    EnsureStatus,
};
use parley_core::error::Result;

/// Bounded ceiling for the background warm-up path. Generation that takes
/// longer loses the race and the warm-up reports `Pending`.
pub const ENSURE_TIMEOUT: Duration = Duration::from_secs(8);

/// Cache service over an enrichment repository and generation provider.
pub struct EnrichmentService {
    repository: Arc<dyn EnrichmentRepository>,
    provider: Arc<dyn EnrichmentProvider>,
}

impl EnrichmentService {
    pub fn new(
        repository: Arc<dyn EnrichmentRepository>,
        provider: Arc<dyn EnrichmentProvider>,
    ) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Returns the cached record for a key, if one exists.
    pub async fn get(&self, key: &EnrichmentKey) -> Result<Option<EnrichmentRecord>> {
        self.repository.find(key).await
    }

    /// Blocking get-or-generate: cache hit short-circuits, otherwise the
    /// provider is called with no deadline and its failure propagates.
    ///
    /// The persist uses set-if-absent; when a concurrent generation won
    /// the write, the persisted record is returned so every caller sees
    /// one consistent value per key.
    pub async fn get_or_generate(
        &self,
        key: &EnrichmentKey,
        input: &EnrichmentInput,
    ) -> Result<EnrichmentRecord> {
        if let Some(record) = self.repository.find(key).await? {
            return Ok(record);
        }

        let output = self.provider.enrich(input).await?;
        let record = EnrichmentRecord {
            text: output.text,
            provider: output.provider,
            created_at: Utc::now(),
        };

        if self.repository.save_if_absent(key, &record).await? {
            Ok(record)
        } else {
            // Lost the write race; surface what actually got persisted.
            Ok(self.repository.find(key).await?.unwrap_or(record))
        }
    }

    /// Background warm-up: never blocks past [`ENSURE_TIMEOUT`] and never
    /// returns a hard error.
    pub async fn ensure(&self, key: &EnrichmentKey, input: &EnrichmentInput) -> EnsureStatus {
        match self.repository.find(key).await {
            Ok(Some(_)) => return EnsureStatus::Cached,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(target: "enrichment", key = %key.storage_key(), error = %err, "Cache lookup failed during warm-up");
                return EnsureStatus::Pending;
            }
        }

        let generated = tokio::time::timeout(ENSURE_TIMEOUT, self.provider.enrich(input)).await;
        let output = match generated {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                tracing::warn!(target: "enrichment", key = %key.storage_key(), error = %err, "Generation failed during warm-up");
                return EnsureStatus::Pending;
            }
            Err(_) => {
                // Deadline won; the generation future is dropped and any
                // late result is discarded, never persisted.
                tracing::warn!(target: "enrichment", key = %key.storage_key(), "Generation exceeded the warm-up deadline");
                return EnsureStatus::Pending;
            }
        };

        let record = EnrichmentRecord {
            text: output.text,
            provider: output.provider,
            created_at: Utc::now(),
        };
        match self.repository.save_if_absent(key, &record).await {
            Ok(true) => EnsureStatus::Fresh,
            Ok(false) => EnsureStatus::Cached,
            Err(err) => {
                tracing::warn!(target: "enrichment", key = %key.storage_key(), error = %err, "Persisting enrichment failed during warm-up");
                EnsureStatus::Pending
            }
        }
    }

    /// Removes the cached record for one key.
    pub async fn invalidate(&self, key: &EnrichmentKey) -> Result<()> {
        self.repository.invalidate(key).await
    }

    /// Removes every cached record.
    pub async fn invalidate_all(&self) -> Result<()> {
        self.repository.invalidate_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_core::enrichment::EnrichmentOutput;
    use parley_core::error::ParleyError;
    use parley_infrastructure::{KeyedEnrichmentRepository, MemoryStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn input() -> EnrichmentInput {
        EnrichmentInput {
            conference_id: "conf-1".to_string(),
            conference_name: "DevSummit".to_string(),
            persona_id: "persona-1".to_string(),
            persona_name: "Avery Chen".to_string(),
            attendee_context: "VP of Engineering.".to_string(),
        }
    }

    fn key() -> EnrichmentKey {
        EnrichmentKey::new("conf-1", "persona-1")
    }

    fn repository() -> Arc<dyn EnrichmentRepository> {
        Arc::new(KeyedEnrichmentRepository::new(Arc::new(MemoryStore::new())))
    }

    /// Provider whose behavior is fixed at construction.
    enum MockBehavior {
        Succeed(&'static str),
        Fail,
        Hang,
    }

    struct MockProvider {
        behavior: MockBehavior,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(behavior: MockBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl EnrichmentProvider for MockProvider {
        async fn enrich(&self, _input: &EnrichmentInput) -> Result<EnrichmentOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                MockBehavior::Succeed(text) => Ok(EnrichmentOutput {
                    text: text.to_string(),
                    provider: "mock".to_string(),
                }),
                MockBehavior::Fail => Err(ParleyError::dependency("provider exploded")),
                MockBehavior::Hang => futures::future::pending().await,
            }
        }
    }

    #[tokio::test]
    async fn test_get_unseeded_key_is_absent_then_ensure_makes_it_fresh() {
        let provider = MockProvider::new(MockBehavior::Succeed("profile"));
        let service = EnrichmentService::new(repository(), provider.clone());

        assert!(service.get(&key()).await.unwrap().is_none());
        assert_eq!(service.ensure(&key(), &input()).await, EnsureStatus::Fresh);

        let record = service.get(&key()).await.unwrap().unwrap();
        assert_eq!(record.text, "profile");
        assert_eq!(record.provider, "mock");

        // Cache hit short-circuits: no second provider call.
        assert_eq!(service.ensure(&key(), &input()).await, EnsureStatus::Cached);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ensure_degrades_to_pending_on_hang_without_poisoning() {
        let service = EnrichmentService::new(
            repository(),
            MockProvider::new(MockBehavior::Hang),
        );

        assert_eq!(
            service.ensure(&key(), &input()).await,
            EnsureStatus::Pending
        );
        // Nothing persisted; a later retry can attempt generation again.
        assert!(service.get(&key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_swallows_provider_failure() {
        let service = EnrichmentService::new(repository(), MockProvider::new(MockBehavior::Fail));

        assert_eq!(
            service.ensure(&key(), &input()).await,
            EnsureStatus::Pending
        );
        assert!(service.get(&key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_or_generate_propagates_provider_failure() {
        let service = EnrichmentService::new(repository(), MockProvider::new(MockBehavior::Fail));

        let err = service.get_or_generate(&key(), &input()).await.unwrap_err();
        assert!(matches!(err, ParleyError::Dependency(_)));
    }

    #[tokio::test]
    async fn test_concurrent_ensure_produces_single_record() {
        let repo = repository();
        let provider = MockProvider::new(MockBehavior::Succeed("profile"));
        let a = EnrichmentService::new(repo.clone(), provider.clone());
        let b = EnrichmentService::new(repo, provider);

        let (key, input) = (key(), input());
        let (status_a, status_b) = tokio::join!(a.ensure(&key, &input), b.ensure(&key, &input));

        // Both callers may have generated, but exactly one write won and no
        // conflicting duplicate exists.
        assert!(matches!(status_a, EnsureStatus::Fresh | EnsureStatus::Cached));
        assert!(matches!(status_b, EnsureStatus::Fresh | EnsureStatus::Cached));
        assert_eq!(
            a.get(&key).await.unwrap().unwrap().text,
            "profile".to_string()
        );
    }

    #[tokio::test]
    async fn test_invalidate_allows_regeneration() {
        let provider = MockProvider::new(MockBehavior::Succeed("profile"));
        let service = EnrichmentService::new(repository(), provider.clone());

        service.get_or_generate(&key(), &input()).await.unwrap();
        service.invalidate(&key()).await.unwrap();
        assert!(service.get(&key()).await.unwrap().is_none());

        service.get_or_generate(&key(), &input()).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
