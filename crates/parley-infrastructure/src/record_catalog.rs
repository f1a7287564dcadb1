//! TOML-backed record catalog.
//!
//! Personas, conferences, and trainees are read-only records loaded from a
//! single TOML catalog file. The catalog implements all three provider
//! traits with in-memory lookups; an empty catalog is a valid state, not
//! an error.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use parley_core::error::{ParleyError, Result};
use parley_core::records::{
    ConferenceProvider, ConferenceRecord, PersonaProvider, PersonaRecord, TraineeProvider,
    TraineeRecord,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    personas: Vec<PersonaRecord>,
    #[serde(default)]
    conferences: Vec<ConferenceRecord>,
    #[serde(default)]
    trainees: Vec<TraineeRecord>,
}

/// Read-only record catalog serving persona/conference/trainee lookups.
#[derive(Debug, Default)]
pub struct RecordCatalog {
    personas: Vec<PersonaRecord>,
    conferences: Vec<ConferenceRecord>,
    trainees: Vec<TraineeRecord>,
}

impl RecordCatalog {
    /// Builds a catalog from already-resolved records (used by tests and
    /// embedded setups).
    pub fn new(
        personas: Vec<PersonaRecord>,
        conferences: Vec<ConferenceRecord>,
        trainees: Vec<TraineeRecord>,
    ) -> Self {
        Self {
            personas,
            conferences,
            trainees,
        }
    }

    /// Loads the catalog from a TOML file.
    ///
    /// A missing file yields an empty catalog; a present but unparsable
    /// file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: CatalogFile = toml::from_str(&content)?;
        Ok(Self::new(file.personas, file.conferences, file.trainees))
    }

    /// Loads the catalog from the default config location,
    /// `<config_dir>/parley/records.toml`.
    pub fn load_default() -> Result<Self> {
        match dirs::config_dir() {
            Some(config_dir) => {
                let path = config_dir.join("parley").join("records.toml");
                Self::load_from_path(&path)
            }
            None => Err(ParleyError::io("Cannot resolve user config directory")),
        }
    }
}

#[async_trait]
impl PersonaProvider for RecordCatalog {
    async fn find_by_id(&self, id: &str) -> Result<Option<PersonaRecord>> {
        Ok(self.personas.iter().find(|p| p.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<PersonaRecord>> {
        Ok(self.personas.clone())
    }
}

#[async_trait]
impl ConferenceProvider for RecordCatalog {
    async fn find_by_id(&self, id: &str) -> Result<Option<ConferenceRecord>> {
        Ok(self.conferences.iter().find(|c| c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ConferenceRecord>> {
        Ok(self.conferences.clone())
    }
}

#[async_trait]
impl TraineeProvider for RecordCatalog {
    async fn find_by_id(&self, id: &str) -> Result<Option<TraineeRecord>> {
        Ok(self.trainees.iter().find(|t| t.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<TraineeRecord>> {
        Ok(self.trainees.clone())
    }
}
