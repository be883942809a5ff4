//! Explicit, injectable transcript cache.
//!
//! Caption tracks and transcript params are scoped to one video, so the cache
//! tracks the "active" video and drops everything when it changes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::VideoId;
use crate::transcript::Transcript;

/// Eviction key: one entry per video, language preference and rendering mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranscriptCacheKey {
    pub video_id: VideoId,
    /// Comma-joined language preference list of the request (e.g. `"vi,en"`).
    pub language_code: String,
    pub include_timestamps: bool,
}

impl TranscriptCacheKey {
    pub fn new(video_id: VideoId, languages: &[String], include_timestamps: bool) -> Self {
        Self {
            video_id,
            language_code: languages.join(","),
            include_timestamps,
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    active: Option<VideoId>,
    entries: HashMap<TranscriptCacheKey, Transcript>,
}

/// Shared handle; clones observe the same entries.
#[derive(Debug, Clone, Default)]
pub struct TranscriptCache {
    inner: Arc<RwLock<CacheState>>,
}

impl TranscriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `video_id` as the active video, dropping every entry if another
    /// video was active. Returns `true` when such a navigation happened.
    pub async fn set_active_video(&self, video_id: &VideoId) -> bool {
        let mut state = self.inner.write().await;
        if state.active.as_ref() == Some(video_id) {
            return false;
        }
        let had_previous = state.active.is_some();
        state.active = Some(video_id.clone());
        if !state.entries.is_empty() {
            tracing::debug!(
                video_id = %video_id,
                dropped = state.entries.len(),
                "transcript cache invalidated on navigation"
            );
            state.entries.clear();
        }
        had_previous
    }

    pub async fn get(&self, key: &TranscriptCacheKey) -> Option<Transcript> {
        self.inner.read().await.entries.get(key).cloned()
    }

    /// Stores an entry. Entries for a video other than the active one are
    /// ignored; they would be stale the moment they land.
    pub async fn put(&self, key: TranscriptCacheKey, transcript: Transcript) {
        let mut state = self.inner.write().await;
        if state.active.as_ref().is_some_and(|a| *a != key.video_id) {
            return;
        }
        state.entries.insert(key, transcript);
    }

    pub async fn invalidate_all(&self) {
        self.inner.write().await.entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}
