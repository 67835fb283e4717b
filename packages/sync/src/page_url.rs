//! # Page URL Sync
//!
//! The mountable unit a view layer attaches to keep location and builder
//! state in step: hydration (location → state) and propagation
//! (state → location) mounted together, in that order.

use crate::history::SharedHistory;
use crate::hydration::HydrationController;
use crate::propagator::LocationPropagator;
use crate::router::{path_builder, PathBuilder, DEFAULT_BASE_PATH};
use crate::state::BuilderState;
use tracing::debug;

pub struct PageUrlSync {
    hydration: HydrationController,
    propagator: LocationPropagator,
}

impl PageUrlSync {
    /// Mount with paths rooted at `/`
    pub fn mount(history: SharedHistory, state: &BuilderState) -> Self {
        Self::mount_with(history, state, path_builder(DEFAULT_BASE_PATH))
    }

    pub fn mount_with(history: SharedHistory, state: &BuilderState, build_path: PathBuilder) -> Self {
        debug!("Mounting page URL sync");
        let hydration = HydrationController::mount(history.clone(), state);
        let propagator = LocationPropagator::mount(history, state, build_path);

        Self {
            hydration,
            propagator,
        }
    }

    pub fn is_waiting_for_pages(&self) -> bool {
        self.hydration.is_waiting_for_pages()
    }

    /// Release every listener
    pub fn unmount(self) {
        debug!("Unmounting page URL sync");
        self.propagator.unmount();
        self.hydration.unmount();
    }
}
