//! # Page Store
//!
//! Ordered, never-empty sequence of pages.
//!
//! Deleting the only page resets it in place instead of removing it, so
//! callers never have to handle an empty notebook.

use crate::page::{Page, PageField};

/// Ordered collection of pages (invariant: `len() >= 1`)
#[derive(Debug, Clone, PartialEq)]
pub struct PageStore {
    pages: Vec<Page>,
}

impl PageStore {
    /// Store holding one empty page
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new()],
        }
    }

    /// Build a store from existing pages, `None` if `pages` is empty
    pub fn from_pages(pages: Vec<Page>) -> Option<Self> {
        if pages.is_empty() {
            None
        } else {
            Some(Self { pages })
        }
    }

    /// Append a default page and return its index
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::new());
        self.pages.len() - 1
    }

    /// Remove the page at `index` and return the index that should become current
    ///
    /// The last remaining page is reset to a default page rather than removed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete_page(&mut self, index: usize) -> usize {
        self.check_index(index);

        if self.pages.len() == 1 {
            self.pages[0] = Page::new();
            return 0;
        }

        self.pages.remove(index);
        index.saturating_sub(1)
    }

    /// Page at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn page(&self, index: usize) -> &Page {
        self.check_index(index);
        &self.pages[index]
    }

    /// Page at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Update a non-text field of the page at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_page_field(&mut self, index: usize, field: PageField) {
        self.check_index(index);
        self.pages[index].apply_field(field);
    }

    /// Replace page text; only the session controller writes text
    pub(crate) fn set_text(&mut self, index: usize, text: String) {
        self.check_index(index);
        self.pages[index].text = text;
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.pages.len(),
            "page index {} out of range for notebook with {} pages",
            index,
            self.pages.len()
        );
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
