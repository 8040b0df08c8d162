//! # Session Serialization
//!
//! Versioned JSON form of a session, as written to local storage.
//!
//! ```text
//! {
//!   "schemaVersion": 1,
//!   "savedAt": "2024-05-01T10:00:00Z",
//!   "session": { "pages": [...], "currentIndex": 0, "textStyle": {...} }
//! }
//! ```
//!
//! The storage key carries the schema version too, so data written by an
//! incompatible build is never even read. Anything that does not decode
//! cleanly is replaced by a fresh session instead of failing startup.

use crate::page::Page;
use crate::typography::TextStyle;
use crate::{EditSession, EditorError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u64 = 1;

/// Local storage key for the current schema
pub const STORAGE_KEY: &str = "writify.session.v1";

/// Persisted part of a session (history is not persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub pages: Vec<Page>,
    pub current_index: usize,
    #[serde(default)]
    pub text_style: TextStyle,
}

/// Storage envelope around a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub schema_version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub session: SessionSnapshot,
}

impl PersistedSession {
    pub fn new(session: SessionSnapshot) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Some(Utc::now()),
            session,
        }
    }
}

/// Serialize a session for storage
pub fn encode(session: &EditSession) -> Result<String, EditorError> {
    let persisted = PersistedSession::new(session.snapshot());
    Ok(serde_json::to_string(&persisted)?)
}

/// Rebuild a session from stored JSON
///
/// The schema version is checked before the body is interpreted, so a
/// newer layout reports `UnsupportedVersion` rather than a parse error.
pub fn decode(source: &str) -> Result<EditSession, EditorError> {
    let value: serde_json::Value = serde_json::from_str(source)?;

    let version = value
        .get("schemaVersion")
        .and_then(serde_json::Value::as_u64)
        .ok_or(EditorError::MissingVersion)?;

    if version != SCHEMA_VERSION {
        return Err(EditorError::UnsupportedVersion {
            found: version,
            expected: SCHEMA_VERSION,
        });
    }

    let persisted: PersistedSession = serde_json::from_value(value)?;
    EditSession::from_snapshot(persisted.session)
}

/// Decode stored state, falling back to a fresh one-page session
pub fn restore_or_default(source: Option<&str>) -> EditSession {
    let Some(source) = source else {
        return EditSession::new();
    };

    match decode(source) {
        Ok(session) => {
            tracing::debug!(pages = session.page_count(), "session restored");
            session
        }
        Err(e) => {
            tracing::warn!("Discarding stored session: {}", e);
            EditSession::new()
        }
    }
}
