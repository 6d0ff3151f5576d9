//! The persisted `{ date, player }` record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use guessr_core::player::Player;
use guessr_core::types::DateId;
use serde::{Deserialize, Serialize};

use crate::{write_atomic, StoreError};

/// Snapshot of the day's pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCacheRecord {
    pub date: DateId,
    pub player: Player,
}

/// Result of looking up the cache for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A record for the requested day.
    Hit(Player),
    /// A record exists but belongs to another day. It is left on disk.
    Stale { cached: DateId },
    /// No cache file.
    Absent,
    /// The file exists but could not be read or parsed.
    Corrupt(String),
}

pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw record, `None` if the file does not exist.
    pub async fn read(&self) -> Result<Option<DailyCacheRecord>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let record =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::json(&self.path, e))?;
        Ok(Some(record))
    }

    /// Look up the record for `today`. A record for any other day is never
    /// returned as a hit.
    pub async fn lookup(&self, today: DateId) -> CacheLookup {
        match self.read().await {
            Ok(Some(record)) if record.date == today => CacheLookup::Hit(record.player),
            Ok(Some(record)) => CacheLookup::Stale {
                cached: record.date,
            },
            Ok(None) => CacheLookup::Absent,
            Err(e) => {
                tracing::warn!(error = %e, "Daily cache unreadable, ignoring it");
                CacheLookup::Corrupt(e.to_string())
            }
        }
    }

    pub async fn save(&self, record: &DailyCacheRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::json(&self.path, e))?;
        write_atomic(&self.path, &bytes).await?;
        tracing::debug!(date = %record.date, player_id = record.player.id, "Daily cache saved");
        Ok(())
    }
}
