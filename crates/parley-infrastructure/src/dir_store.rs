//! Directory-backed keyed store.
//!
//! One file per key under a base directory, in the
//! `<base>/<namespace>/<id>.json` layout. The namespace is everything
//! before the first `:` of the key. Suitable for local single-node
//! deployments; the files are small and writes stay per-key atomic at the
//! filesystem level (`create_new` for set-if-absent).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parley_core::error::{ParleyError, Result};

use crate::keyed_store::KeyedStore;

/// Keyed store persisting each entry as a JSON file.
pub struct DirStore {
    base_dir: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a store at the default data location,
    /// `<data_dir>/parley/store`.
    pub fn at_default_location() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ParleyError::io("Cannot resolve user data directory"))?;
        Ok(Self::new(data_dir.join("parley").join("store")))
    }

    /// Returns the base directory path.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Splits a `<namespace>:<id>` key into directory and file-stem parts.
    /// Both halves are sanitized to filename-safe characters.
    fn key_path(&self, key: &str) -> PathBuf {
        let (namespace, id) = key.split_once(':').unwrap_or(("default", key));
        self.base_dir
            .join(sanitize(namespace))
            .join(format!("{}.json", sanitize(id)))
    }
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl KeyedStore for DirStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value)?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(mut file) => {
                file.write_all(value.as_bytes())?;
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_values(&self, prefix: &str) -> Result<Vec<String>> {
        let (namespace, id_prefix) = prefix.split_once(':').unwrap_or((prefix, ""));
        let dir = self.base_dir.join(sanitize(namespace));
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let id_prefix = sanitize(id_prefix);
        let mut values = Vec::new();
        for entry in entries {
            let path = entry.map_err(ParleyError::from)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            if !stem.starts_with(&id_prefix) {
                continue;
            }
            values.push(fs::read_to_string(&path)?);
        }
        Ok(values)
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let (namespace, id_prefix) = prefix.split_once(':').unwrap_or((prefix, ""));
        let dir = self.base_dir.join(sanitize(namespace));
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let id_prefix = sanitize(id_prefix);
        for entry in entries {
            let path = entry.map_err(ParleyError::from)?.path();
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            if stem.starts_with(&id_prefix) {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
