//! # Edit Session
//!
//! The session controller: the single writer of the page store, the edit
//! history and the current page.
//!
//! Every text change goes through [`EditSession::apply_edit`], which records
//! the previous text and writes the new text in one step, so history and
//! pages cannot drift apart. The "current text" shown by the view is always
//! read from the current page rather than kept as a separate copy.

use crate::mutations::{Mutation, MutationError, MutationResult};
use crate::page::{Page, PageField};
use crate::page_store::PageStore;
use crate::serializer::SessionSnapshot;
use crate::stats::TextStats;
use crate::typography::TextStyle;
use crate::undo_stack::{HistoryEntry, UndoStack};
use crate::EditorError;

/// One notebook being edited
#[derive(Debug, Clone)]
pub struct EditSession {
    pages: PageStore,

    /// Index of the displayed page (invariant: `< pages.len()`)
    current_index: usize,

    text_style: TextStyle,

    history: UndoStack,

    /// Increments on every state change
    version: u64,
}

impl EditSession {
    /// Session with one empty page and the default history capacity
    pub fn new() -> Self {
        Self::with_history(UndoStack::new())
    }

    /// Session with one empty page and a custom history capacity
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self::with_history(UndoStack::with_capacity(capacity))
    }

    fn with_history(history: UndoStack) -> Self {
        Self {
            pages: PageStore::new(),
            current_index: 0,
            text_style: TextStyle::default(),
            history,
            version: 0,
        }
    }

    /// Rebuild a session from persisted state
    ///
    /// History starts empty; it is not persisted.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, EditorError> {
        let len = snapshot.pages.len();
        let pages = PageStore::from_pages(snapshot.pages).ok_or(EditorError::EmptySession)?;

        if snapshot.current_index >= len {
            return Err(EditorError::CurrentIndexOutOfRange {
                index: snapshot.current_index,
                len,
            });
        }

        Ok(Self {
            pages,
            current_index: snapshot.current_index,
            text_style: snapshot.text_style.clamped(),
            history: UndoStack::new(),
            version: 0,
        })
    }

    /// Persistable view of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pages: self.pages.pages().to_vec(),
            current_index: self.current_index,
            text_style: self.text_style.clone(),
        }
    }

    /// Replace the current page's text, recording the old text for undo
    ///
    /// Returns `false` (and records nothing) when the text is unchanged.
    pub fn apply_edit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let index = self.current_index;
        let previous = &self.pages.page(index).text;

        if *previous == text {
            return false;
        }

        self.history.record_before_edit(index, previous.clone());
        self.pages.set_text(index, text);
        self.bump();
        true
    }

    /// Empty the current page; undoable like any other edit
    pub fn clear_current_page(&mut self) -> bool {
        self.apply_edit(String::new())
    }

    /// Revert the most recent edit and show the page it was made on
    pub fn undo(&mut self) -> bool {
        let pages = &self.pages;
        match self.history.undo(|index| pages.page(index).text.clone()) {
            Some(entry) => {
                tracing::debug!(page = entry.page_index, "undo");
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone edit and show its page
    pub fn redo(&mut self) -> bool {
        let pages = &self.pages;
        match self.history.redo(|index| pages.page(index).text.clone()) {
            Some(entry) => {
                tracing::debug!(page = entry.page_index, "redo");
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, entry: HistoryEntry) {
        self.current_index = entry.page_index;
        self.pages.set_text(entry.page_index, entry.snapshot_text);
        self.bump();
    }

    /// Append a page and make it current
    pub fn add_page(&mut self) -> usize {
        let index = self.pages.add_page();
        self.current_index = index;
        self.bump();
        tracing::debug!(page = index, total = self.pages.len(), "page added");
        index
    }

    /// Delete a page and return the new current index
    ///
    /// Deleting the only page clears it instead.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete_page(&mut self, index: usize) -> usize {
        let removed = self.pages.len() > 1;
        self.current_index = self.pages.delete_page(index);
        self.history.forget_page(index, removed);
        self.bump();
        tracing::debug!(page = index, removed, total = self.pages.len(), "page deleted");
        self.current_index
    }

    /// Show another page
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn switch_page(&mut self, index: usize) {
        // Bounds check before moving the cursor
        self.pages.page(index);
        if self.current_index != index {
            self.current_index = index;
            self.bump();
        }
    }

    /// Update paper or background of a page (not recorded in history)
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_page_field(&mut self, index: usize, field: PageField) {
        self.pages.set_page_field(index, field);
        self.bump();
    }

    /// Replace the handwriting style; values are clamped into range
    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style.clamped();
        self.bump();
    }

    /// Apply a mutation received from outside the process
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        mutation.validate(&self.pages)?;
        let before = self.version;

        match mutation {
            Mutation::UpdateText { text } => {
                self.apply_edit(text);
            }
            Mutation::ClearPage => {
                self.clear_current_page();
            }
            Mutation::Undo => {
                self.undo();
            }
            Mutation::Redo => {
                self.redo();
            }
            Mutation::AddPage => {
                self.add_page();
            }
            Mutation::DeletePage { index } => {
                self.delete_page(index);
            }
            Mutation::SwitchPage { index } => self.switch_page(index),
            Mutation::SetPageField { index, field } => self.set_page_field(index, field),
            Mutation::SetTextStyle { style } => self.set_text_style(style),
        }

        Ok(MutationResult {
            version: self.version,
            changed: self.version != before,
            current_index: self.current_index,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_page(&self) -> &Page {
        self.pages.page(self.current_index)
    }

    pub fn current_text(&self) -> &str {
        &self.current_page().text
    }

    pub fn pages(&self) -> &PageStore {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.text_style
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history.set_capacity(capacity);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Character and word counts of the current page
    pub fn stats(&self) -> TextStats {
        TextStats::of(self.current_text())
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::VisualStyle;

    #[test]
    fn test_session_creation() {
        let session = EditSession::new();

        assert_eq!(session.page_count(), 1);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_text(), "");
        assert_eq!(session.version(), 0);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_edit_then_undo_then_redo() {
        let mut session = EditSession::new();
        session.apply_edit("Hello");
        session.apply_edit("Hello, world");

        assert!(session.undo());
        assert_eq!(session.current_text(), "Hello");

        assert!(session.redo());
        assert_eq!(session.current_text(), "Hello, world");
    }

    #[test]
    fn test_unchanged_text_records_nothing() {
        let mut session = EditSession::new();
        session.apply_edit("same");
        let version = session.version();

        assert!(!session.apply_edit("same"));
        assert_eq!(session.history().undo_levels(), 1);
        assert_eq!(session.version(), version);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut session = EditSession::new();
        session.apply_edit("draft");

        assert!(session.clear_current_page());
        assert_eq!(session.current_text(), "");

        session.undo();
        assert_eq!(session.current_text(), "draft");
    }

    #[test]
    fn test_add_page_switches_to_it() {
        let mut session = EditSession::new();
        assert_eq!(session.add_page(), 1);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.page_count(), 2);
    }

    #[test]
    fn test_delete_page_drops_its_history() {
        let mut session = EditSession::new();
        session.apply_edit("first");
        session.add_page();
        session.apply_edit("second");
        session.add_page();
        session.apply_edit("third");

        session.delete_page(1);

        // Undo reaches page "third" (now index 1), then page 0
        assert!(session.undo());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_text(), "");

        assert!(session.undo());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_text(), "");

        assert!(!session.undo());
    }

    #[test]
    fn test_switch_page_same_index_is_noop() {
        let mut session = EditSession::new();
        session.switch_page(0);
        assert_eq!(session.version(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_switch_page_out_of_range_panics() {
        let mut session = EditSession::new();
        session.switch_page(1);
    }

    #[test]
    fn test_apply_rejects_bad_index_without_change() {
        let mut session = EditSession::new();
        session.apply_edit("keep");
        let version = session.version();

        let result = session.apply(Mutation::DeletePage { index: 3 });

        assert_eq!(
            result,
            Err(MutationError::PageOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(session.version(), version);
        assert_eq!(session.current_text(), "keep");
    }

    #[test]
    fn test_apply_reports_noop() {
        let mut session = EditSession::new();

        let result = session.apply(Mutation::Undo).unwrap();
        assert!(!result.changed);

        let result = session
            .apply(Mutation::UpdateText {
                text: "hi".to_string(),
            })
            .unwrap();
        assert!(result.changed);
        assert_eq!(result.version, 1);
    }

    #[test]
    fn test_set_page_field_is_not_in_history() {
        let mut session = EditSession::new();
        session.set_page_field(0, PageField::VisualStyle(VisualStyle::Dotted));

        assert_eq!(session.current_page().visual_style, VisualStyle::Dotted);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_text_style_is_clamped() {
        let mut session = EditSession::new();
        session.set_text_style(TextStyle {
            font_size: 99.0,
            ..TextStyle::default()
        });
        assert_eq!(session.text_style().font_size, 40.0);
    }

    #[test]
    fn test_from_snapshot_rejects_bad_index() {
        let mut snapshot = EditSession::new().snapshot();
        snapshot.current_index = 2;

        assert!(matches!(
            EditSession::from_snapshot(snapshot),
            Err(EditorError::CurrentIndexOutOfRange { index: 2, len: 1 })
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_empty_pages() {
        let mut snapshot = EditSession::new().snapshot();
        snapshot.pages.clear();

        assert!(matches!(
            EditSession::from_snapshot(snapshot),
            Err(EditorError::EmptySession)
        ));
    }
}
