// Local view-state store: the durable home of ViewState.
//
// Responsibilities
// - Load the persisted document; a missing, unreadable or corrupt document reads as empty state.
// - Apply every mutation as a read-modify-write of the whole document.
// - On any storage failure, log it and continue in memory for the rest of the session.
//
// Boundaries
// - No operation returns an error. View state is advisory.

use crate::modules::reports::core::report::{Remark, ReportId};
use crate::modules::reports::core::view_state::{ViewState, ViewStateDocument};
use crate::shared::infrastructure::key_value_store::{KeyValueStore, StorageError};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

pub const VIEW_STATE_KEY: &str = "view_state";

pub struct ViewStateStore {
    backend: Arc<dyn KeyValueStore>,
    state: Mutex<ViewState>,
    memory_only: AtomicBool,
}

impl ViewStateStore {
    pub async fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let store = Self {
            backend,
            state: Mutex::new(ViewState::new()),
            memory_only: AtomicBool::new(false),
        };
        store.load().await;
        store
    }

    /// Creates a store that never touches persistence.
    pub fn in_memory(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            state: Mutex::new(ViewState::new()),
            memory_only: AtomicBool::new(true),
        }
    }

    pub fn is_memory_only(&self) -> bool {
        self.memory_only.load(Ordering::Relaxed)
    }

    pub async fn load(&self) -> ViewState {
        let mut guard = self.state.lock().await;
        if !self.is_memory_only() {
            *guard = self.read_persisted().await.unwrap_or_default();
        }
        guard.clone()
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub async fn is_viewed(&self, id: &ReportId) -> bool {
        self.state.lock().await.is_viewed(id)
    }

    pub async fn mark_viewed(&self, id: &ReportId, now: DateTime<Utc>) {
        self.modify(|state| state.mark_viewed(id, now)).await;
    }

    pub async fn cache_remark(&self, id: &ReportId, remark: Remark) {
        self.modify(|state| state.cache_remark(id, remark)).await;
    }

    pub async fn evict_older_than(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let removed = self
            .modify(|state| state.evict_older_than(now, ttl))
            .await;
        if removed > 0 {
            tracing::info!(removed, ttl_days = ttl.num_days(), "evicted expired viewed reports");
        }
        removed
    }

    async fn modify<T>(&self, apply: impl FnOnce(&mut ViewState) -> T) -> T {
        let mut guard = self.state.lock().await;
        if !self.is_memory_only() {
            if let Some(persisted) = self.read_persisted().await {
                *guard = persisted;
            }
        }
        let out = apply(&mut guard);
        if !self.is_memory_only() {
            if let Err(err) = self.write_persisted(&guard).await {
                self.degrade(&err);
            }
        }
        out
    }

    /// `None` when nothing usable is persisted.
    async fn read_persisted(&self) -> Option<ViewState> {
        let raw = match self.backend.read(VIEW_STATE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                self.degrade(&err);
                return None;
            }
        };
        match serde_json::from_str::<ViewStateDocument>(&raw) {
            Ok(document) => Some(ViewState::from(document)),
            Err(err) => {
                let err = StorageError::Corrupt {
                    key: VIEW_STATE_KEY.to_string(),
                    reason: err.to_string(),
                };
                tracing::warn!(error = %err, "discarding corrupt view state");
                None
            }
        }
    }

    async fn write_persisted(&self, state: &ViewState) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&state.to_document()).map_err(|err| {
            StorageError::Corrupt {
                key: VIEW_STATE_KEY.to_string(),
                reason: err.to_string(),
            }
        })?;
        self.backend.write(VIEW_STATE_KEY, &encoded).await
    }

    fn degrade(&self, err: &StorageError) {
        if !self.memory_only.swap(true, Ordering::Relaxed) {
            tracing::warn!(error = %err, "view state storage unavailable, continuing in memory");
        }
    }
}
