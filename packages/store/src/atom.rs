use crate::batch;
use crate::computed::Source;
use crate::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct AtomInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener_id: Cell<u64>,
}

impl<T: Clone> AtomInner<T> {
    fn notify(&self) {
        // Snapshot so listeners can (un)subscribe while being notified
        let listeners: Vec<(u64, Listener<T>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in listeners {
            if !self.is_registered(id) {
                continue;
            }
            let value = self.value.borrow().clone();
            listener(&value);
        }
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(other, _)| *other == id)
    }
}

/// Observable value cell.
///
/// Cloning an `Atom` yields another handle to the same cell. Setting a value
/// equal to the current one is a no-op; any other write notifies listeners
/// with the value current at delivery time.
pub struct Atom<T> {
    inner: Rc<AtomInner<T>>,
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Atom<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(AtomInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value, notifying listeners if it changed
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }

        let key = Rc::as_ptr(&self.inner) as *const () as usize;
        let deferred = batch::defer(key, || {
            let inner = Rc::clone(&self.inner);
            let notify: Box<dyn FnOnce()> = Box::new(move || inner.notify());
            notify
        });
        if !deferred {
            self.inner.notify();
        }
    }

    /// Register a listener for future changes
    pub fn listen(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.listen_rc(Rc::new(listener))
    }

    /// Register a listener and call it right away with the current value
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        let subscription = self.listen_rc(Rc::clone(&listener));
        let value = self.get();
        listener(&value);
        subscription
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Type-erased handle for use as a [`Computed`](crate::Computed) source
    pub fn as_source(&self) -> Rc<dyn Source> {
        Rc::new(self.clone())
    }

    fn listen_rc(&self, listener: Listener<T>) -> Subscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));

        let inner: Weak<AtomInner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Atom<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Source for Atom<T> {
    fn listen_changes(&self, listener: Rc<dyn Fn()>) -> Subscription {
        self.listen(move |_| listener())
    }
}

impl<T: fmt::Debug> fmt::Debug for Atom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("value", &*self.inner.value.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}
