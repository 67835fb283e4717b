//! # Builder Sync
//!
//! Keeps the builder's location (query params) and its reactive page state
//! in step, so the editing surface is deep-linkable and back/forward
//! navigable while live state stays authoritative.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ location: ?pageId=…&pageHash=…&mode=…       │
//! └─────────────────────────────────────────────┘
//!        │ hydrate (catalog load, pop-state)   ↑ navigate (on difference)
//!        ↓                                     │
//! ┌─────────────────────────────────────────────┐
//! │ state: pages, awareness, page hash, mode    │
//! └─────────────────────────────────────────────┘
//!        │ page hash changes
//!        ↓
//! ┌─────────────────────────────────────────────┐
//! │ view: scroll anchor element into view       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Defaults stay implicit**: home page, empty hash and design mode are
//!    never written to the location
//! 2. **Compare before navigate**: propagation is a no-op when the location
//!    already decodes to the live state, which breaks the hydrate/navigate loop
//! 3. **Strict in, lenient out**: an unknown mode aborts hydration but reads
//!    as "absent" when only comparing
//! 4. **Injected collaborators**: history, view and path formatting sit
//!    behind traits and closures
//!
//! ## Usage
//!
//! ```rust
//! use builder_sync::{
//!     BuilderMode, BuilderState, HashLinkSync, MemoryDocument, MemoryHistory, Page, PageCatalog,
//!     PageUrlSync,
//! };
//! use std::rc::Rc;
//!
//! let history = Rc::new(MemoryHistory::new("/?pageId=P2&mode=content"));
//! let document = Rc::new(MemoryDocument::with_elements(["pricing"]));
//! let state = BuilderState::new();
//!
//! let page_url = PageUrlSync::mount(history.clone(), &state);
//! let hash_link = HashLinkSync::mount(document.clone(), &state.selected_page_hash);
//!
//! state.load_pages(PageCatalog::new(
//!     Page::new("P1", "Home", "/"),
//!     vec![Page::new("P2", "Pricing", "/pricing")],
//! ));
//! assert_eq!(state.builder_mode.get(), BuilderMode::Content);
//! assert_eq!(history.navigation_count(), 0);
//!
//! state.selected_page_hash.set("pricing".to_string());
//! assert_eq!(history.current(), "/?pageId=P2&pageHash=pricing&mode=content");
//! assert_eq!(document.scrolled(), vec!["pricing".to_string()]);
//!
//! page_url.unmount();
//! hash_link.unmount();
//! ```

mod awareness;
mod document;
mod errors;
mod history;
mod hydration;
mod location;
mod mode;
mod page_url;
mod pages;
mod propagator;
mod router;
mod scroll;
mod state;

pub use awareness::Awareness;
pub use document::{DocumentView, MemoryDocument};
pub use errors::{SyncError, SyncResult};
pub use history::{search_of, History, MemoryHistory, SharedHistory};
pub use hydration::{hydrate_from_location, HydrationController};
pub use location::{
    decode_location, encode_location, peek_location, try_decode_location, PageLocation, SearchParams,
};
pub use mode::{
    is_builder_mode, parse_mode_or_absent, parse_mode_strict, try_parse_mode, BuilderMode,
    InvalidModeError,
};
pub use page_url::PageUrlSync;
pub use pages::{Page, PageCatalog};
pub use propagator::{sync_location_from_state, LocationPropagator};
pub use router::{
    builder_path, path_builder, BuilderPathParams, PathBuilder, AUTH_TOKEN_PARAM, DEFAULT_BASE_PATH,
    MODE_PARAM, PAGE_HASH_PARAM, PAGE_ID_PARAM,
};
pub use scroll::{anchor_element_id, scroll_to_page_hash, HashLinkSync};
pub use state::BuilderState;

// Re-export store types that appear in this crate's API
pub use builder_store::{batch, Atom, Computed, Subscription};
