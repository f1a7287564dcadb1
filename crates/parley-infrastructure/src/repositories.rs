//! Repository implementations over a keyed store.
//!
//! Each repository maps one domain type onto the store with a namespaced
//! key (`session:<id>`, `score:<token>`, `enrichment:<conf>:<persona>`,
//! `leaderboard:<token>`) and a JSON value.

use std::sync::Arc;

use async_trait::async_trait;
use parley_core::enrichment::{EnrichmentKey, EnrichmentRecord, EnrichmentRepository};
use parley_core::error::Result;
use parley_core::leaderboard::{LeaderboardEntry, LeaderboardRepository};
use parley_core::scoring::{ScoreRecord, ScoreRepository};
use parley_core::session::{Session, SessionRepository};

use crate::keyed_store::KeyedStore;

const SESSION_NS: &str = "session";
const SCORE_NS: &str = "score";
const ENRICHMENT_NS: &str = "enrichment";
const LEADERBOARD_NS: &str = "leaderboard";

fn decode_all<T: serde::de::DeserializeOwned>(values: Vec<String>) -> Result<Vec<T>> {
    values
        .into_iter()
        .map(|value| serde_json::from_str(&value).map_err(Into::into))
        .collect()
}

/// Session persistence over a keyed store.
pub struct KeyedSessionRepository {
    store: Arc<dyn KeyedStore>,
}

impl KeyedSessionRepository {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_NS}:{session_id}")
    }
}

#[async_trait]
impl SessionRepository for KeyedSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        match self.store.get(&Self::key(session_id)).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let value = serde_json::to_string(session)?;
        self.store.set(&Self::key(&session.id), &value).await
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.store.delete(&Self::key(session_id)).await
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        decode_all(self.store.list_values(&format!("{SESSION_NS}:")).await?)
    }
}

/// Score persistence over a keyed store, keyed by invite token.
pub struct KeyedScoreRepository {
    store: Arc<dyn KeyedStore>,
}

impl KeyedScoreRepository {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    fn key(token: &str) -> String {
        format!("{SCORE_NS}:{token}")
    }
}

#[async_trait]
impl ScoreRepository for KeyedScoreRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<ScoreRecord>> {
        match self.store.get(&Self::key(token)).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, score: &ScoreRecord) -> Result<()> {
        let value = serde_json::to_string(score)?;
        self.store.set(&Self::key(&score.token), &value).await
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>> {
        decode_all(self.store.list_values(&format!("{SCORE_NS}:")).await?)
    }
}

/// Enrichment cache over a keyed store.
///
/// `save_if_absent` leans on the store's atomic set-if-absent so duplicate
/// concurrent generations cannot corrupt a key; the first write wins.
pub struct KeyedEnrichmentRepository {
    store: Arc<dyn KeyedStore>,
}

impl KeyedEnrichmentRepository {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    fn key(key: &EnrichmentKey) -> String {
        format!("{ENRICHMENT_NS}:{}", key.storage_key())
    }
}

#[async_trait]
impl EnrichmentRepository for KeyedEnrichmentRepository {
    async fn find(&self, key: &EnrichmentKey) -> Result<Option<EnrichmentRecord>> {
        match self.store.get(&Self::key(key)).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    async fn save_if_absent(
        &self,
        key: &EnrichmentKey,
        record: &EnrichmentRecord,
    ) -> Result<bool> {
        let value = serde_json::to_string(record)?;
        self.store.set_if_absent(&Self::key(key), &value).await
    }

    async fn invalidate(&self, key: &EnrichmentKey) -> Result<()> {
        self.store.delete(&Self::key(key)).await
    }

    async fn invalidate_all(&self) -> Result<()> {
        self.store.delete_prefix(&format!("{ENRICHMENT_NS}:")).await
    }
}

/// Leaderboard index over a keyed store.
pub struct KeyedLeaderboardRepository {
    store: Arc<dyn KeyedStore>,
}

impl KeyedLeaderboardRepository {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    fn key(token: &str) -> String {
        format!("{LEADERBOARD_NS}:{token}")
    }
}

#[async_trait]
impl LeaderboardRepository for KeyedLeaderboardRepository {
    async fn append(&self, entry: &LeaderboardEntry) -> Result<()> {
        let value = serde_json::to_string(entry)?;
        self.store.set(&Self::key(&entry.token), &value).await
    }

    async fn list_all(&self) -> Result<Vec<LeaderboardEntry>> {
        decode_all(
            self.store
                .list_values(&format!("{LEADERBOARD_NS}:"))
                .await?,
        )
    }
}
