//! # Writify Editor
//!
//! Document session for the Writify handwriting notebook.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: browser UI / native shell             │
//! └─────────────────────────────────────────────┘
//!                     ↓ Mutation / method calls
//! ┌─────────────────────────────────────────────┐
//! │ EditSession: single writer                  │
//! │  - PageStore: ordered, never-empty pages    │
//! │  - UndoStack: bounded per-page text history │
//! │  - current page, text style, version        │
//! └─────────────────────────────────────────────┘
//!                     ↓ encode / decode
//! ┌─────────────────────────────────────────────┐
//! │ serializer: versioned JSON for storage      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One writer**: pages, history and current page only change through
//!    `EditSession`
//! 2. **Never empty**: deleting the last page clears it instead
//! 3. **History follows pages**: undo and redo jump to the page an edit was
//!    made on
//! 4. **Bad indices fail fast**: direct calls panic, serialized mutations
//!    return `MutationError`
//!
//! ## Usage
//!
//! ```rust
//! use writify_editor::{EditSession, encode, decode};
//!
//! let mut session = EditSession::new();
//! session.apply_edit("Dear diary,");
//! session.add_page();
//! session.apply_edit("Page two");
//!
//! session.undo();
//! assert_eq!(session.current_index(), 1);
//! assert_eq!(session.current_text(), "");
//!
//! let stored = encode(&session).unwrap();
//! let restored = decode(&stored).unwrap();
//! assert_eq!(restored.page_count(), 2);
//! ```

mod errors;
mod mutations;
mod page;
mod page_store;
mod serializer;
mod session;
mod stats;
mod typography;
mod undo_stack;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use page::{BackgroundAdjustment, ImageRef, Page, PageField, VisualStyle};
pub use page_store::PageStore;
pub use serializer::{
    decode, encode, restore_or_default, PersistedSession, SessionSnapshot, SCHEMA_VERSION,
    STORAGE_KEY,
};
pub use session::EditSession;
pub use stats::{is_blank, TextStats};
pub use typography::{FontFamily, TextStyle, DEFAULT_TEXT_COLOR};
pub use undo_stack::{HistoryEntry, UndoStack, DEFAULT_HISTORY_CAPACITY};
