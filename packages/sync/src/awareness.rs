//! Which page the user is looking at.
//!
//! Awareness stores only the selected page *identifier*. The selected page
//! itself is derived against the catalog, so it is `None` until the catalog is
//! loaded and whenever the identifier names no page.

use crate::pages::{Page, PageCatalog};
use builder_store::{Atom, Computed};

#[derive(Clone, Debug)]
pub struct Awareness {
    page_id: Atom<Option<String>>,
    selected_page: Computed<Option<Page>>,
}

impl Awareness {
    pub fn new(pages: &Atom<Option<PageCatalog>>) -> Self {
        let page_id: Atom<Option<String>> = Atom::new(None);

        let selected_page = {
            let pages = pages.clone();
            let page_id = page_id.clone();
            Computed::new(vec![pages.as_source(), page_id.as_source()], move || {
                let id = page_id.get()?;
                pages.with(|catalog| catalog.as_ref()?.find(&id).cloned())
            })
        };

        Self {
            page_id,
            selected_page,
        }
    }

    /// Select a page by identifier
    pub fn select_page(&self, page_id: impl Into<String>) {
        self.page_id.set(Some(page_id.into()));
    }

    pub fn selected_page_id(&self) -> Option<String> {
        self.page_id.get()
    }

    /// The selected page resolved against the catalog
    pub fn selected_page(&self) -> &Computed<Option<Page>> {
        &self.selected_page
    }
}
