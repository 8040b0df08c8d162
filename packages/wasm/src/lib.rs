use wasm_bindgen::prelude::*;
use writify_editor::{encode, restore_or_default, EditSession, Mutation, STORAGE_KEY};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Notebook session owned by the browser host
#[wasm_bindgen]
pub struct Notebook {
    session: EditSession,
}

#[wasm_bindgen]
impl Notebook {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Notebook {
        Notebook {
            session: EditSession::new(),
        }
    }

    /// Rebuild from local storage contents, or start fresh
    #[wasm_bindgen(js_name = restore)]
    pub fn restore(stored: Option<String>) -> Notebook {
        Notebook {
            session: restore_or_default(stored.as_deref()),
        }
    }

    /// Key the host should use with local storage
    #[wasm_bindgen(js_name = storageKey)]
    pub fn storage_key() -> String {
        STORAGE_KEY.to_string()
    }

    /// Apply a JSON mutation, returns the JSON result
    #[wasm_bindgen(js_name = apply)]
    pub fn apply_js(&mut self, mutation_json: &str) -> Result<String, JsValue> {
        self.apply_json(mutation_json)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    #[wasm_bindgen(getter, js_name = currentText)]
    pub fn current_text(&self) -> String {
        self.session.current_text().to_string()
    }

    #[wasm_bindgen(getter, js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.session.page_count()
    }

    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.history().can_undo()
    }

    #[wasm_bindgen(getter, js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.history().can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.session.version() as f64
    }

    /// Inline CSS for the text area
    #[wasm_bindgen(js_name = previewCss)]
    pub fn preview_css(&self) -> String {
        self.session.text_style().to_css()
    }

    /// `{"chars": n, "words": n}` for the current page
    pub fn stats(&self) -> String {
        serde_json::to_string(&self.session.stats()).unwrap_or_default()
    }

    /// Pages, current index and text style as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Versioned state for local storage
    pub fn serialize(&self) -> Result<String, JsValue> {
        encode(&self.session).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl Notebook {
    fn apply_json(&mut self, mutation_json: &str) -> Result<String, String> {
        let mutation: Mutation = serde_json::from_str(mutation_json)
            .map_err(|e| format!("Invalid mutation: {}", e))?;
        let result = self.session.apply(mutation).map_err(|e| e.to_string())?;
        serde_json::to_string(&result).map_err(|e| format!("Serialization error: {}", e))
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}
