//! # Builder Store
//!
//! Observable value cells shared by the builder's synchronization units.
//!
//! ## Model
//!
//! ```text
//! ┌──────────┐  set()   ┌──────────────┐  notify   ┌────────────┐
//! │  caller  │ ───────→ │   Atom<T>    │ ────────→ │ listeners  │
//! └──────────┘          └──────────────┘           └────────────┘
//!                              │ source
//!                              ↓
//!                       ┌──────────────┐  notify (on change only)
//!                       │ Computed<T>  │ ────────→ listeners
//!                       └──────────────┘
//! ```
//!
//! - Everything is single-threaded (`Rc`/`RefCell`), delivery is synchronous
//!   and follows registration order.
//! - Every registration returns a [`Subscription`] guard. Dropping it removes
//!   the listener.
//! - [`batch`] defers notifications until the outermost batch returns, so
//!   observers only ever see the final state of a multi-field write.
//!
//! ## Usage
//!
//! ```rust
//! use builder_store::{batch, Atom};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mode = Atom::new("design".to_string());
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&seen);
//! let subscription = mode.listen(move |_| counter.set(counter.get() + 1));
//!
//! batch(|| {
//!     mode.set("preview".to_string());
//!     mode.set("content".to_string());
//! });
//! assert_eq!(seen.get(), 1);
//!
//! drop(subscription);
//! mode.set("design".to_string());
//! assert_eq!(seen.get(), 1);
//! ```

mod atom;
mod batch;
mod computed;
mod subscription;

pub use atom::Atom;
pub use batch::batch;
pub use computed::{Computed, Source};
pub use subscription::Subscription;
