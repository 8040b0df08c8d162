//! # Undo/Redo Stack
//!
//! Linear edit history over page text.
//!
//! ## Design
//!
//! - Each entry is a snapshot of a page's text *before* an edit, tagged with
//!   the page it belongs to
//! - Undo restores the snapshot and moves the replaced text to the redo stack
//! - Redo is the mirror image
//! - Recording a new edit clears the redo stack
//! - Both stacks are bounded; the oldest entry is dropped on overflow
//!
//! Entries carry their page index because the user may switch pages between
//! edits. Undo has to jump back to the page the edit was made on, not act on
//! whatever page is displayed.
//!
//! ## Example
//!
//! ```rust
//! use writify_editor::UndoStack;
//!
//! let mut texts = vec![String::from("hello")];
//! let mut stack = UndoStack::new();
//!
//! stack.record_before_edit(0, texts[0].clone());
//! texts[0] = String::from("hello world");
//!
//! if let Some(entry) = stack.undo(|page| texts[page].clone()) {
//!     texts[entry.page_index] = entry.snapshot_text;
//! }
//! assert_eq!(texts[0], "hello");
//! assert!(stack.can_redo());
//! ```

use std::collections::VecDeque;

/// Default number of undo levels
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Text of one page at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub snapshot_text: String,
    pub page_index: usize,
}

impl HistoryEntry {
    pub fn new(snapshot_text: impl Into<String>, page_index: usize) -> Self {
        Self {
            snapshot_text: snapshot_text.into(),
            page_index,
        }
    }
}

/// Undo/redo stacks for page text edits
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Snapshots to restore on undo (most recent last)
    undo_stack: VecDeque<HistoryEntry>,

    /// Snapshots to restore on redo (most recent last)
    redo_stack: VecDeque<HistoryEntry>,

    /// Maximum entries per stack (0 = unlimited)
    capacity: usize,
}

impl UndoStack {
    /// Create an undo stack with the default capacity (50)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an undo stack holding at most `capacity` entries per direction
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            capacity,
        }
    }

    /// Record the text a page had before an edit
    ///
    /// Must be called before the page text changes. Invalidates redo.
    pub fn record_before_edit(&mut self, page_index: usize, previous_text: impl Into<String>) {
        push_bounded(
            &mut self.undo_stack,
            HistoryEntry::new(previous_text, page_index),
            self.capacity,
        );
        self.redo_stack.clear();
    }

    /// Undo the most recent edit
    ///
    /// `current_text_of` returns the present text of a page so it can be
    /// saved for redo. Returns the entry the caller must write back to its
    /// page, or `None` when there is nothing to undo.
    pub fn undo<F>(&mut self, current_text_of: F) -> Option<HistoryEntry>
    where
        F: FnOnce(usize) -> String,
    {
        let entry = self.undo_stack.pop_back()?;

        let current = current_text_of(entry.page_index);
        push_bounded(
            &mut self.redo_stack,
            HistoryEntry::new(current, entry.page_index),
            self.capacity,
        );

        Some(entry)
    }

    /// Redo the most recently undone edit
    pub fn redo<F>(&mut self, current_text_of: F) -> Option<HistoryEntry>
    where
        F: FnOnce(usize) -> String,
    {
        let entry = self.redo_stack.pop_back()?;

        let current = current_text_of(entry.page_index);
        push_bounded(
            &mut self.undo_stack,
            HistoryEntry::new(current, entry.page_index),
            self.capacity,
        );

        Some(entry)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if capacity > 0 {
            for stack in [&mut self.undo_stack, &mut self.redo_stack] {
                while stack.len() > capacity {
                    stack.pop_front();
                }
            }
        }
    }

    /// Entry the next undo would restore
    pub fn peek_undo(&self) -> Option<&HistoryEntry> {
        self.undo_stack.back()
    }

    /// Drop history belonging to a deleted page
    ///
    /// When the page was removed (rather than reset in place) entries for
    /// later pages shift down by one so they keep pointing at the same page.
    pub fn forget_page(&mut self, page_index: usize, removed: bool) {
        for stack in [&mut self.undo_stack, &mut self.redo_stack] {
            stack.retain(|entry| entry.page_index != page_index);
            if removed {
                for entry in stack.iter_mut() {
                    if entry.page_index > page_index {
                        entry.page_index -= 1;
                    }
                }
            }
        }
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

/// FIFO eviction: the oldest entry goes first
fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
    stack.push_back(entry);
    if capacity > 0 && stack.len() > capacity {
        stack.pop_front();
    }
}
