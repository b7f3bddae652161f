//! Clip cache interface.
//!
//! Resume/skip-existing behavior is modeled as an explicit key-value store
//! injected into the run, scoped to one pipeline run rather than living as
//! a process-wide singleton. Packing output is immutable once computed, so
//! a cached clip for a unit ID is always safe to reuse.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::generate::ClipHandle;

/// Key-value store of produced clips, keyed by unit ID.
#[async_trait]
pub trait ClipCache: Send + Sync {
    async fn get(&self, unit_id: &str) -> Option<ClipHandle>;
    async fn put(&self, unit_id: &str, clip: ClipHandle);
}

/// In-memory cache for single-process runs and tests.
#[derive(Clone, Default)]
pub struct MemoryClipCache {
    entries: Arc<Mutex<HashMap<String, ClipHandle>>>,
}

impl MemoryClipCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached clips.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl ClipCache for MemoryClipCache {
    async fn get(&self, unit_id: &str) -> Option<ClipHandle> {
        self.entries.lock().await.get(unit_id).cloned()
    }

    async fn put(&self, unit_id: &str, clip: ClipHandle) {
        self.entries.lock().await.insert(unit_id.to_string(), clip);
    }
}

/// Directory-backed cache that survives process restarts.
///
/// Each entry is a small JSON sidecar named `<unit_id>.json` holding the
/// clip handle. Unreadable or corrupt sidecars count as misses.
#[derive(Clone)]
pub struct FsClipCache {
    dir: PathBuf,
}

impl FsClipCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, unit_id: &str) -> PathBuf {
        self.dir.join(format!("{unit_id}.json"))
    }
}

#[async_trait]
impl ClipCache for FsClipCache {
    async fn get(&self, unit_id: &str) -> Option<ClipHandle> {
        let path = self.entry_path(unit_id);
        let bytes = tokio::fs::read(&path).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(clip) => Some(clip),
            Err(e) => {
                warn!(unit = %unit_id, path = %path.display(), error = %e, "discarding corrupt cache entry");
                None
            }
        }
    }

    async fn put(&self, unit_id: &str, clip: ClipHandle) {
        let path = self.entry_path(unit_id);
        let bytes = match serde_json::to_vec(&clip) {
            Ok(b) => b,
            Err(e) => {
                warn!(unit = %unit_id, error = %e, "failed to serialize cache entry");
                return;
            }
        };
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %e, "failed to create cache directory");
            return;
        }
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            warn!(unit = %unit_id, path = %path.display(), error = %e, "failed to write cache entry");
        }
    }
}
