//! # Builder State
//!
//! The observable holders the synchronization units read and write. The
//! state is a bundle of handles; cloning it shares the same cells.
//!
//! | holder | written by | read by |
//! |---|---|---|
//! | `pages` | catalog loader | hydration, propagator, awareness |
//! | `awareness` | hydration, UI | propagator |
//! | `selected_page_hash` | hydration, UI | propagator, scroll reconciler |
//! | `builder_mode` | hydration, UI | propagator |
//! | `auth_token` | session | propagator |

use crate::awareness::Awareness;
use crate::mode::BuilderMode;
use crate::pages::{Page, PageCatalog};
use builder_store::Atom;

#[derive(Clone, Debug)]
pub struct BuilderState {
    /// `None` until the catalog has loaded
    pub pages: Atom<Option<PageCatalog>>,

    pub awareness: Awareness,

    /// Scroll anchor; empty means no anchor
    pub selected_page_hash: Atom<String>,

    pub builder_mode: Atom<BuilderMode>,

    pub auth_token: Atom<Option<String>>,
}

impl BuilderState {
    pub fn new() -> Self {
        let pages = Atom::new(None);
        let awareness = Awareness::new(&pages);

        Self {
            pages,
            awareness,
            selected_page_hash: Atom::new(String::new()),
            builder_mode: Atom::new(BuilderMode::default()),
            auth_token: Atom::new(None),
        }
    }

    /// Set the mode; `None` restores the default
    pub fn set_builder_mode(&self, mode: Option<BuilderMode>) {
        self.builder_mode.set(mode.unwrap_or_default());
    }

    pub fn select_page(&self, page_id: impl Into<String>) {
        self.awareness.select_page(page_id);
    }

    pub fn selected_page(&self) -> Option<Page> {
        self.awareness.selected_page().get()
    }

    pub fn load_pages(&self, catalog: PageCatalog) {
        self.pages.set(Some(catalog));
    }
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new()
    }
}
