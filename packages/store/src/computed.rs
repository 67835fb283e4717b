use crate::subscription::Subscription;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Anything a [`Computed`] can depend on
pub trait Source {
    /// Call `listener` whenever this source changes
    fn listen_changes(&self, listener: Rc<dyn Fn()>) -> Subscription;
}

/// Value derived from one or more sources.
///
/// `get` always recomputes from the sources' current values, so a read never
/// observes a stale derivation. Listeners fire only when the derived value
/// actually differs from the last value they were given.
pub struct Computed<T> {
    sources: Vec<Rc<dyn Source>>,
    compute: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            compute: Rc::clone(&self.compute),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Computed<T> {
    pub fn new(sources: Vec<Rc<dyn Source>>, compute: impl Fn() -> T + 'static) -> Self {
        Self {
            sources,
            compute: Rc::new(compute),
        }
    }

    pub fn get(&self) -> T {
        (self.compute)()
    }

    /// Register a listener for changes of the derived value
    pub fn listen(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let last = Rc::new(RefCell::new(self.get()));
        let listener: Rc<dyn Fn(&T)> = Rc::new(listener);

        let subscriptions: Vec<Subscription> = self
            .sources
            .iter()
            .map(|source| {
                let compute = Rc::clone(&self.compute);
                let last = Rc::clone(&last);
                let listener = Rc::clone(&listener);
                source.listen_changes(Rc::new(move || {
                    let next = compute();
                    {
                        let mut last = last.borrow_mut();
                        if *last == next {
                            return;
                        }
                        *last = next.clone();
                    }
                    listener(&next);
                }))
            })
            .collect();

        Subscription::merge(subscriptions)
    }

    /// Type-erased handle for use as another computed value's source
    pub fn as_source(&self) -> Rc<dyn Source> {
        Rc::new(self.clone())
    }
}

impl<T: Clone + PartialEq + 'static> Source for Computed<T> {
    fn listen_changes(&self, listener: Rc<dyn Fn()>) -> Subscription {
        self.listen(move |_| listener())
    }
}

impl<T> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("sources", &self.sources.len())
            .finish()
    }
}
