//! # State-to-Location Propagator
//!
//! Pushes builder state changes into the location.
//!
//! Every run compares the live state with what the current location decodes
//! to and navigates only on a difference. That comparison is what keeps
//! hydration and propagation from feeding each other: a hydration writes
//! exactly what the location says, so the run it triggers finds a match.

use crate::history::{History, SharedHistory};
use crate::location::{encode_location, peek_location, PageLocation, SearchParams};
use crate::router::PathBuilder;
use crate::state::BuilderState;
use builder_store::Subscription;
use std::rc::Rc;
use tracing::{debug, info, trace};

/// Navigate to the location of the current state unless already there.
///
/// Returns the path navigated to. Nothing happens while the catalog or the
/// selected page is unavailable.
pub fn sync_location_from_state(
    history: &dyn History,
    state: &BuilderState,
    build_path: &PathBuilder,
) -> Option<String> {
    let Some(catalog) = state.pages.get() else {
        trace!("Page catalog not loaded, skipping location sync");
        return None;
    };
    let Some(page) = state.selected_page() else {
        trace!("No selected page, skipping location sync");
        return None;
    };

    let desired = PageLocation {
        page_id: page.id,
        page_hash: state.selected_page_hash.get(),
        mode: state.builder_mode.get(),
    };
    let current = peek_location(&SearchParams::parse(&history.search()), &catalog);

    if current == desired {
        trace!(page_id = %desired.page_id, "Location already matches builder state");
        return None;
    }

    debug!(?current, ?desired, "Builder state differs from location");

    let params = encode_location(&desired, catalog.home_page_id(), state.auth_token.get());
    let path = build_path(&params);
    info!(path = %path, "Navigating to builder location");
    history.navigate(&path);

    Some(path)
}

/// Mounted propagation: runs once on mount, then on every change of the
/// selected page, the page hash or the builder mode
pub struct LocationPropagator {
    subscriptions: Subscription,
}

impl LocationPropagator {
    pub fn mount(history: SharedHistory, state: &BuilderState, build_path: PathBuilder) -> Self {
        let sync: Rc<dyn Fn()> = {
            let state = state.clone();
            Rc::new(move || {
                sync_location_from_state(history.as_ref(), &state, &build_path);
            })
        };

        sync();

        let on_page = Rc::clone(&sync);
        let on_hash = Rc::clone(&sync);
        let on_mode = sync;

        let subscriptions = Subscription::merge([
            state.awareness.selected_page().listen(move |_| on_page()),
            state.selected_page_hash.listen(move |_| on_hash()),
            state.builder_mode.listen(move |_| on_mode()),
        ]);

        Self { subscriptions }
    }

    pub fn unmount(self) {
        self.subscriptions.unsubscribe();
    }
}
