//! # Session Mutations
//!
//! Serializable form of every operation the notebook UI can invoke.
//!
//! Hosts that talk to the session over a boundary (the browser bridge, a
//! message queue) send these as JSON instead of calling methods directly.
//! Because the page indices then come from outside the process they are
//! validated and rejected with [`MutationError`] rather than treated as
//! programming errors.

use crate::page::PageField;
use crate::page_store::PageStore;
use crate::typography::TextStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operations on an [`EditSession`](crate::EditSession)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Replace the current page's text (one keystroke or paste)
    UpdateText { text: String },

    /// Empty the current page (undoable)
    ClearPage,

    Undo,

    Redo,

    /// Append a page and switch to it
    AddPage,

    DeletePage { index: usize },

    SwitchPage { index: usize },

    /// Change paper, background image or its placement
    SetPageField { index: usize, field: PageField },

    SetTextStyle { style: TextStyle },
}

impl Mutation {
    /// Check the mutation can be applied to `pages`
    pub fn validate(&self, pages: &PageStore) -> Result<(), MutationError> {
        match self {
            Mutation::DeletePage { index }
            | Mutation::SwitchPage { index }
            | Mutation::SetPageField { index, .. } => {
                if pages.contains(*index) {
                    Ok(())
                } else {
                    Err(MutationError::PageOutOfRange {
                        index: *index,
                        len: pages.len(),
                    })
                }
            }
            _ => Ok(()),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::UpdateText { .. } => "update_text",
            Mutation::ClearPage => "clear_page",
            Mutation::Undo => "undo",
            Mutation::Redo => "redo",
            Mutation::AddPage => "add_page",
            Mutation::DeletePage { .. } => "delete_page",
            Mutation::SwitchPage { .. } => "switch_page",
            Mutation::SetPageField { .. } => "set_page_field",
            Mutation::SetTextStyle { .. } => "set_text_style",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Page {index} out of range (notebook has {len} pages)")]
    PageOutOfRange { index: usize, len: usize },
}

/// Outcome of applying a mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// False when the mutation was a no-op (empty undo, unchanged text)
    pub changed: bool,

    /// Page displayed after the mutation
    pub current_index: usize,
}
