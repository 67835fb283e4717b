//! # Hydration Controller
//!
//! Copies the location into builder state.
//!
//! ```text
//!   mount ──→ waiting for pages ──(catalog loads)──→ hydrate ──→ listening
//!                    │                                              │
//!                    └──────────(unmount)──→ released ←──(unmount)──┘
//!
//!   listening: every pop-state ──→ hydrate
//! ```
//!
//! The catalog subscription is one-shot: it hydrates on the first
//! notification that carries a catalog and releases itself. Since the catalog
//! never goes back to unloaded, that hydration precedes every pop-state one.

use crate::history::{History, SharedHistory};
use crate::location::{decode_location, PageLocation, SearchParams};
use crate::state::BuilderState;
use builder_store::{batch, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, trace};

/// Decode the current location and write it into `state`.
///
/// Returns the decoded location, or `None` when the catalog has not loaded
/// yet. All writes land in one batch, so observers see the hydrated fields
/// together.
///
/// # Panics
///
/// Panics when the location carries an unknown `mode`.
pub fn hydrate_from_location(history: &dyn History, state: &BuilderState) -> Option<PageLocation> {
    let Some(catalog) = state.pages.get() else {
        trace!("Page catalog not loaded, skipping hydration");
        return None;
    };

    let params = SearchParams::parse(&history.search());
    let location = decode_location(&params, &catalog);

    debug!(
        page_id = %location.page_id,
        page_hash = %location.page_hash,
        mode = %location.mode,
        "Hydrating builder state from location"
    );

    batch(|| {
        state.set_builder_mode(Some(location.mode));
        state.selected_page_hash.set(location.page_hash.clone());
        state.select_page(location.page_id.clone());
    });

    Some(location)
}

/// Mounted hydration: one-shot on catalog load plus every pop-state
pub struct HydrationController {
    pending_initial: Rc<RefCell<Option<Subscription>>>,
    initial_done: Rc<Cell<bool>>,
    pop_state: Option<Subscription>,
}

impl HydrationController {
    pub fn mount(history: SharedHistory, state: &BuilderState) -> Self {
        let pending_initial: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let initial_done = Rc::new(Cell::new(false));

        let subscription = {
            let history = Rc::clone(&history);
            let state = state.clone();
            let pending_initial = Rc::clone(&pending_initial);
            let initial_done = Rc::clone(&initial_done);
            let pages = state.pages.clone();
            pages.subscribe(move |pages| {
                if pages.is_none() || initial_done.get() {
                    return;
                }
                initial_done.set(true);
                drop(pending_initial.borrow_mut().take());
                debug!("Page catalog loaded");
                hydrate_from_location(history.as_ref(), &state);
            })
        };

        // Already loaded: the listener fired inside `subscribe`
        if initial_done.get() {
            subscription.unsubscribe();
        } else {
            *pending_initial.borrow_mut() = Some(subscription);
        }

        let pop_state = {
            let history_handle = Rc::clone(&history);
            let state = state.clone();
            history.listen_pop_state(Rc::new(move || {
                hydrate_from_location(history_handle.as_ref(), &state);
            }))
        };

        Self {
            pending_initial,
            initial_done,
            pop_state: Some(pop_state),
        }
    }

    /// Whether the one-shot catalog hydration has yet to run
    pub fn is_waiting_for_pages(&self) -> bool {
        !self.initial_done.get()
    }

    pub fn unmount(self) {}
}

impl Drop for HydrationController {
    fn drop(&mut self) {
        // The pending subscription's listener holds this slot, so it has to
        // be emptied explicitly
        drop(self.pending_initial.borrow_mut().take());
        drop(self.pop_state.take());
    }
}
