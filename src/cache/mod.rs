//! Explicit cache for the loaded mapping.
//!
//! The cache does not watch the source. Callers pass a [`SourceSignal`]
//! (the spreadsheet's modification time) and the cached mapping is reused only
//! while the signal is unchanged.

use crate::mapping::{load_mapping, Mapping, MappingError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Freshness signal for the mapping source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSignal {
    pub modified: SystemTime,
}

/// Read the freshness signal of `source`
pub async fn source_signal(source: &Path) -> Result<SourceSignal, MappingError> {
    let metadata = fs::metadata(source).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MappingError::SourceNotFound(source.display().to_string()),
        _ => MappingError::from(e),
    })?;

    Ok(SourceSignal {
        modified: metadata.modified()?,
    })
}

struct CachedMapping {
    signal: SourceSignal,
    mapping: Arc<Mapping>,
}

pub struct MappingCache {
    source: PathBuf,
    csv_delimiter: Option<u8>,
    state: Mutex<Option<CachedMapping>>,
}

impl MappingCache {
    pub fn new(source: impl Into<PathBuf>, csv_delimiter: Option<u8>) -> Self {
        Self {
            source: source.into(),
            csv_delimiter,
            state: Mutex::new(None),
        }
    }

    /// Return the mapping for `signal`, loading it if the cache is empty or stale
    pub async fn get(&self, signal: SourceSignal) -> Result<Arc<Mapping>, MappingError> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if cached.signal == signal {
                debug!("Serving cached mapping");
                return Ok(cached.mapping.clone());
            }
            info!(source = %self.source.display(), "Spreadsheet changed, reloading");
        }

        let mapping = Arc::new(self.load().await?);
        *state = Some(CachedMapping {
            signal,
            mapping: mapping.clone(),
        });
        Ok(mapping)
    }

    /// Read the current signal from disk and return the matching mapping
    pub async fn current(&self) -> Result<Arc<Mapping>, MappingError> {
        let signal = source_signal(&self.source).await?;
        self.get(signal).await
    }

    /// Drop the cached mapping. Safe to call repeatedly.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        if state.take().is_some() {
            info!(source = %self.source.display(), "Mapping cache invalidated");
        }
    }

    /// Invalidate and load again from disk
    pub async fn refresh(&self) -> Result<Arc<Mapping>, MappingError> {
        self.invalidate().await;
        self.current().await
    }

    async fn load(&self) -> Result<Mapping, MappingError> {
        let source = self.source.clone();
        let csv_delimiter = self.csv_delimiter;

        tokio::task::spawn_blocking(move || load_mapping(&source, csv_delimiter))
            .await
            .map_err(|e| MappingError::SourceUnreadable(format!("loader task failed: {}", e)))?
    }
}
