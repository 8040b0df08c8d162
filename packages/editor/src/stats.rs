//! Character and word counts shown under the editor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    /// UTF-16 code units, the same length a browser text field reports
    pub chars: usize,
    pub words: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.encode_utf16().count(),
            words: text.split_whitespace().count(),
        }
    }
}

/// True when the text has no visible content
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
