//! # History
//!
//! The navigation seam. A host provides the current query string, a way to
//! push a new entry without reloading, and pop-state notifications for
//! back/forward moves.
//!
//! [`MemoryHistory`] is the in-process implementation used by tests and the
//! replay tool. It behaves like a browser session history: pushing truncates
//! forward entries and does not emit pop-state, moving the cursor does.

use builder_store::Subscription;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

pub trait History {
    /// Query string of the current entry, including its leading `?` if any
    fn search(&self) -> String;

    /// Push a new entry
    fn navigate(&self, path: &str);

    /// Call `listener` after every back/forward move
    fn listen_pop_state(&self, listener: Rc<dyn Fn()>) -> Subscription;
}

/// Shared handle to a history implementation
pub type SharedHistory = Rc<dyn History>;

struct MemoryHistoryInner {
    entries: RefCell<Vec<String>>,
    index: Cell<usize>,
    pushes: Cell<usize>,
    listeners: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_listener_id: Cell<u64>,
}

#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<MemoryHistoryInner>,
}

impl MemoryHistory {
    /// Start with a single entry
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(MemoryHistoryInner {
                entries: RefCell::new(vec![initial.into()]),
                index: Cell::new(0),
                pushes: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    pub fn current(&self) -> String {
        self.inner.entries.borrow()[self.inner.index.get()].clone()
    }

    pub fn entries(&self) -> Vec<String> {
        self.inner.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self) -> usize {
        self.inner.index.get()
    }

    /// Entries pushed through [`History::navigate`]
    pub fn navigation_count(&self) -> usize {
        self.inner.pushes.get()
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta`; returns `false` (and emits nothing) when
    /// the move would leave the entry list
    pub fn go(&self, delta: isize) -> bool {
        let current = self.inner.index.get();
        let Some(target) = current.checked_add_signed(delta) else {
            return false;
        };
        if delta == 0 || target >= self.len() {
            return false;
        }

        self.inner.index.set(target);
        debug!(from = current, to = target, "History pop-state");
        self.emit_pop_state();
        true
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn emit_pop_state(&self) {
        let listeners: Vec<(u64, Rc<dyn Fn()>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in listeners {
            let registered = self.inner.listeners.borrow().iter().any(|(other, _)| *other == id);
            if registered {
                listener();
            }
        }
    }
}

impl History for MemoryHistory {
    fn search(&self) -> String {
        search_of(&self.current()).to_string()
    }

    fn navigate(&self, path: &str) {
        let mut entries = self.inner.entries.borrow_mut();
        let next = self.inner.index.get() + 1;
        entries.truncate(next);
        entries.push(path.to_string());
        self.inner.index.set(next);
        self.inner.pushes.set(self.inner.pushes.get() + 1);
        debug!(path, entries = entries.len(), "History push");
    }

    fn listen_pop_state(&self, listener: Rc<dyn Fn()>) -> Subscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));

        let inner: Weak<MemoryHistoryInner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &*self.inner.entries.borrow())
            .field("index", &self.inner.index.get())
            .finish()
    }
}

/// The `?query` part of a path or URL, without any fragment
pub fn search_of(path: &str) -> &str {
    let without_fragment = path.split('#').next().unwrap_or(path);
    match without_fragment.find('?') {
        Some(start) if start + 1 < without_fragment.len() => &without_fragment[start..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_of() {
        assert_eq!(search_of("/"), "");
        assert_eq!(search_of("/?"), "");
        assert_eq!(search_of("/?pageId=P2"), "?pageId=P2");
        assert_eq!(search_of("/builder?mode=content#top"), "?mode=content");
        assert_eq!(search_of("https://example.com/?a=1"), "?a=1");
    }

    #[test]
    fn test_navigate_pushes_without_pop_state() {
        let history = MemoryHistory::new("/");
        let pops = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pops);
        let _sub = history.listen_pop_state(Rc::new(move || counter.set(counter.get() + 1)));

        history.navigate("/?pageId=P2");

        assert_eq!(history.search(), "?pageId=P2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.navigation_count(), 1);
        assert_eq!(pops.get(), 0);
    }

    #[test]
    fn test_back_and_forward_emit_pop_state() {
        let history = MemoryHistory::new("/");
        history.navigate("/?mode=preview");

        let pops = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pops);
        let _sub = history.listen_pop_state(Rc::new(move || counter.set(counter.get() + 1)));

        assert!(history.back());
        assert_eq!(history.search(), "");
        assert!(!history.back());

        assert!(history.forward());
        assert_eq!(history.search(), "?mode=preview");
        assert!(!history.forward());
        assert!(!history.go(0));

        assert_eq!(pops.get(), 2);
    }

    #[test]
    fn test_navigate_truncates_forward_entries() {
        let history = MemoryHistory::new("/");
        history.navigate("/?pageId=P2");
        history.navigate("/?pageId=P3");
        history.back();
        history.back();

        history.navigate("/?pageId=P4");

        assert_eq!(history.entries(), vec!["/".to_string(), "/?pageId=P4".to_string()]);
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_dropping_subscription_removes_listener() {
        let history = MemoryHistory::new("/");
        let sub = history.listen_pop_state(Rc::new(|| {}));
        assert_eq!(history.listener_count(), 1);

        drop(sub);
        assert_eq!(history.listener_count(), 0);
    }
}
