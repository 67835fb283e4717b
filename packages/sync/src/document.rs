//! The view seam used by the scroll reconciler.

use std::cell::RefCell;
use std::collections::HashSet;

/// Element lookup and scrolling in the rendered view
pub trait DocumentView {
    type Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn scroll_into_view(&self, element: &Self::Element);
}

/// In-process view: a set of element ids and a log of scrolls
#[derive(Debug, Default)]
pub struct MemoryDocument {
    element_ids: RefCell<HashSet<String>>,
    scrolled: RefCell<Vec<String>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let document = Self::new();
        for id in ids {
            document.add_element(id);
        }
        document
    }

    pub fn add_element(&self, id: impl Into<String>) {
        self.element_ids.borrow_mut().insert(id.into());
    }

    pub fn remove_element(&self, id: &str) -> bool {
        self.element_ids.borrow_mut().remove(id)
    }

    /// Ids scrolled into view, oldest first
    pub fn scrolled(&self) -> Vec<String> {
        self.scrolled.borrow().clone()
    }

    pub fn last_scrolled(&self) -> Option<String> {
        self.scrolled.borrow().last().cloned()
    }
}

impl DocumentView for MemoryDocument {
    type Element = String;

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.element_ids.borrow().get(id).cloned()
    }

    fn scroll_into_view(&self, element: &String) {
        self.scrolled.borrow_mut().push(element.clone());
    }
}
