//! # Session Persistence
//!
//! Best-effort save and forgiving load of the notebook session.
//!
//! Saving never reports failure to the editing path: a failed write is
//! logged and the next edit simply tries again. Loading never fails: corrupt,
//! missing or incompatible data yields a fresh one-page session.

use crate::storage::{KeyValueStore, StorageResult};
use writify_editor::{decode, encode, EditSession, STORAGE_KEY};

/// Persistence adapter over a key-value store
#[derive(Debug, Clone)]
pub struct SessionPersistence<S> {
    store: S,
    key: String,
    history_capacity: Option<usize>,
}

impl<S: KeyValueStore> SessionPersistence<S> {
    /// Adapter using the default versioned key
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            history_capacity: None,
        }
    }

    /// Undo capacity applied to restored sessions
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Raw stored state, `None` when absent or unreadable
    pub fn load(&self) -> Option<String> {
        match self.store.get(&self.key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to read stored session: {}", e);
                None
            }
        }
    }

    /// Stored session, `None` when nothing usable is stored
    ///
    /// Corrupt or incompatible data is logged and treated as absent.
    pub fn try_restore(&self) -> Option<EditSession> {
        let raw = self.load()?;
        match decode(&raw) {
            Ok(mut session) => {
                if let Some(capacity) = self.history_capacity {
                    session.set_history_capacity(capacity);
                }
                tracing::debug!(pages = session.page_count(), "session restored");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "Discarding stored session: {}", e);
                None
            }
        }
    }

    /// Stored session, or a default one-page session
    pub fn restore(&self) -> EditSession {
        self.try_restore().unwrap_or_else(|| self.new_session())
    }

    /// Empty one-page session with this adapter's history capacity
    pub fn new_session(&self) -> EditSession {
        match self.history_capacity {
            Some(capacity) => EditSession::with_history_capacity(capacity),
            None => EditSession::new(),
        }
    }

    /// Persist the session; errors are logged, not returned
    pub fn save(&self, session: &EditSession) {
        match encode(session) {
            Ok(encoded) => self.save_encoded(&encoded),
            Err(e) => tracing::warn!("Failed to encode session: {}", e),
        }
    }

    /// Persist an already encoded session; errors are logged, not returned
    pub fn save_encoded(&self, encoded: &str) {
        if let Err(e) = self.try_save_encoded(encoded) {
            tracing::warn!(key = %self.key, "Failed to save session: {}", e);
        }
    }

    pub fn try_save_encoded(&self, encoded: &str) -> StorageResult<()> {
        self.store.set(&self.key, encoded)?;
        tracing::debug!(key = %self.key, bytes = encoded.len(), "session saved");
        Ok(())
    }

    /// Forget the stored session
    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(&self.key)
    }
}
