use super::CacheKey;
use crate::error::CacheError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

type Result<T> = std::result::Result<T, CacheError>;

pub(super) const STORAGE_KEY_PREFIX: &str = "responsive-scaling-cache";

/// Minimal key-value backend for cross-session cache reuse (e.g., session
/// storage). Implementations only move strings around.
pub trait PersistedStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One cached value on the wire:
/// `{"key": ["fontSize", 48.0, "mobile", 0], "value": 12.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub key: (String, f64, String, u64),
    pub value: f64,
}

impl PersistedRecord {
    fn from_entry(key: &CacheKey, value: f64) -> Self {
        Self {
            key: (
                key.token.clone(),
                key.base_value(),
                key.breakpoint.clone(),
                key.version,
            ),
            value,
        }
    }

    fn into_entry(self) -> (CacheKey, f64) {
        let (token, base_value, breakpoint, version) = self.key;
        (CacheKey::new(token, base_value, breakpoint, version), self.value)
    }
}

pub(super) fn storage_key(namespace: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}:{namespace}")
}

pub(super) fn encode_records<'a>(
    entries: impl Iterator<Item = (&'a CacheKey, &'a f64)>,
) -> Result<String> {
    let records: Vec<PersistedRecord> = entries
        .map(|(key, value)| PersistedRecord::from_entry(key, *value))
        .collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decodes a snapshot, dropping records from other strategy versions.
pub(super) fn decode_records(json: &str, version: u64) -> Result<Vec<(CacheKey, f64)>> {
    let records: Vec<PersistedRecord> = serde_json::from_str(json)?;
    let total = records.len();
    let current: Vec<(CacheKey, f64)> = records
        .into_iter()
        .filter(|record| record.key.3 == version && record.value.is_finite())
        .map(PersistedRecord::into_entry)
        .collect();
    if current.len() < total {
        log::debug!(
            "Discarded {} stale persisted cache records",
            total - current.len()
        );
    }
    Ok(current)
}

/// Process-local store, the in-memory analogue of browser session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistedStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", safe_component(key)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PersistedStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        if let Err(err) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}

fn safe_component(raw: &str) -> String {
    let out: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        "_".to_string()
    } else {
        out
    }
}
