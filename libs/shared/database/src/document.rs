use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;

/// A JSON file that is always read and rewritten in full.
///
/// A missing file reads as `T::default()`; a file that exists but does not
/// parse is an error.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    pub async fn read<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Document {} not found, treating as empty", self.path.display());
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StoreError::Io { path: self.path.clone(), source });
            }
        };

        debug!("Read {} bytes from {}", bytes.len(), self.path.display());

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn write<T>(&self, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let body = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        // Readers never observe a half-written document.
        let staging = self.staging_path();
        tokio::fs::write(&staging, body)
            .await
            .map_err(|source| StoreError::Io { path: staging.clone(), source })?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;

        debug!("Rewrote {}", self.path.display());
        Ok(())
    }
}
