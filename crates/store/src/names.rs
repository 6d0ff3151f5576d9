//! Player-name list for guess autocomplete.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{write_atomic, StoreError};

pub struct NameStore {
    path: PathBuf,
}

impl NameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored names. A missing file is created holding `[]`.
    pub async fn load_or_init(&self) -> Result<Vec<String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::json(&self.path, e))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Player names file missing, creating it");
                self.save(&[]).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    pub async fn save(&self, names: &[String]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(names).map_err(|e| StoreError::json(&self.path, e))?;
        write_atomic(&self.path, &bytes).await
    }
}
