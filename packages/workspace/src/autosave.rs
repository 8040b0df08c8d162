//! Debounced autosave.
//!
//! The editing path hands over the encoded state after each change and
//! returns immediately. A background task keeps only the newest state and
//! writes it once no further change has arrived for the configured delay.

use crate::persistence::SessionPersistence;
use crate::storage::KeyValueStore;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use writify_editor::{encode, EditSession};

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(800);

/// Handle to the autosave task
#[derive(Debug)]
pub struct Autosaver {
    tx: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl Autosaver {
    /// Start the autosave task on the current tokio runtime
    pub fn spawn<S>(persistence: SessionPersistence<S>, delay: Duration) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(persistence, delay, rx));
        Self { tx, task }
    }

    /// Queue the session's current state for saving
    pub fn schedule(&self, session: &EditSession) {
        match encode(session) {
            Ok(encoded) => self.schedule_encoded(encoded),
            Err(e) => tracing::warn!("Failed to encode session for autosave: {}", e),
        }
    }

    pub fn schedule_encoded(&self, encoded: String) {
        if self.tx.send(encoded).is_err() {
            tracing::warn!("Autosave task has stopped, change not queued");
        }
    }

    /// Stop the task, writing any pending state first
    pub async fn shutdown(self) {
        let Self { tx, task } = self;
        drop(tx);
        if let Err(e) = task.await {
            tracing::warn!("Autosave task ended abnormally: {}", e);
        }
    }
}

async fn run<S: KeyValueStore>(
    persistence: SessionPersistence<S>,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let mut pending: Option<String> = None;

    loop {
        let received = if pending.is_none() {
            rx.recv().await
        } else {
            match tokio::time::timeout(delay, rx.recv()).await {
                Ok(received) => received,
                Err(_elapsed) => {
                    if let Some(encoded) = pending.take() {
                        persistence.save_encoded(&encoded);
                    }
                    continue;
                }
            }
        };

        match received {
            Some(encoded) => pending = Some(encoded),
            None => break,
        }
    }

    if let Some(encoded) = pending.take() {
        tracing::debug!("flushing pending autosave");
        persistence.save_encoded(&encoded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use writify_editor::{decode, STORAGE_KEY};

    fn saved_text(store: &MemoryStore) -> String {
        let raw = store.get(STORAGE_KEY).unwrap().expect("nothing saved");
        decode(&raw).unwrap().current_text().to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_written_once() {
        let store = MemoryStore::new();
        let autosaver = Autosaver::spawn(
            SessionPersistence::new(store.clone()),
            DEFAULT_AUTOSAVE_DELAY,
        );

        let mut session = EditSession::new();
        for text in ["H", "Hi", "Hi!"] {
            session.apply_edit(text);
            autosaver.schedule(&session);
        }

        tokio::time::sleep(Duration::from_millis(900)).await;

        assert_eq!(store.write_count(), 1);
        assert_eq!(saved_text(&store), "Hi!");
        autosaver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_edits_are_written_separately() {
        let store = MemoryStore::new();
        let autosaver = Autosaver::spawn(
            SessionPersistence::new(store.clone()),
            DEFAULT_AUTOSAVE_DELAY,
        );

        let mut session = EditSession::new();
        session.apply_edit("first");
        autosaver.schedule(&session);
        tokio::time::sleep(Duration::from_millis(900)).await;

        session.apply_edit("second");
        autosaver.schedule(&session);
        tokio::time::sleep(Duration::from_millis(900)).await;

        assert_eq!(store.write_count(), 2);
        assert_eq!(saved_text(&store), "second");
        autosaver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_edit_resets_the_timer() {
        let store = MemoryStore::new();
        let autosaver = Autosaver::spawn(
            SessionPersistence::new(store.clone()),
            DEFAULT_AUTOSAVE_DELAY,
        );

        let mut session = EditSession::new();
        session.apply_edit("a");
        autosaver.schedule(&session);
        tokio::time::sleep(Duration::from_millis(500)).await;

        session.apply_edit("ab");
        autosaver.schedule(&session);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(store.write_count(), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(store.write_count(), 1);
        assert_eq!(saved_text(&store), "ab");
        autosaver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending_state() {
        let store = MemoryStore::new();
        let autosaver = Autosaver::spawn(
            SessionPersistence::new(store.clone()),
            DEFAULT_AUTOSAVE_DELAY,
        );

        let mut session = EditSession::new();
        session.apply_edit("unsaved");
        autosaver.schedule(&session);
        autosaver.shutdown().await;

        assert_eq!(store.write_count(), 1);
        assert_eq!(saved_text(&store), "unsaved");
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_shutdown_writes_nothing() {
        let store = MemoryStore::new();
        let autosaver = Autosaver::spawn(
            SessionPersistence::new(store.clone()),
            DEFAULT_AUTOSAVE_DELAY,
        );

        autosaver.shutdown().await;
        assert_eq!(store.write_count(), 0);
    }
}
