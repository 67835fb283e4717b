//! Deferred notification batches.
//!
//! While a batch is open, atoms record that they changed instead of notifying.
//! When the outermost batch closes, each changed atom notifies once, in the
//! order it first changed, with whatever value it holds at that point.

use std::cell::RefCell;
use tracing::trace;

type PendingNotify = Box<dyn FnOnce()>;

thread_local! {
    static PENDING: RefCell<Option<Vec<(usize, PendingNotify)>>> = const { RefCell::new(None) };
}

/// Run `f` with notifications deferred until it returns.
///
/// Nested batches join the outermost one. If `f` panics, the pending
/// notifications are discarded.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    let outermost = PENDING.with(|pending| {
        let mut pending = pending.borrow_mut();
        if pending.is_some() {
            false
        } else {
            *pending = Some(Vec::new());
            true
        }
    });

    if !outermost {
        return f();
    }

    let guard = BatchGuard;
    let result = f();
    let pending = PENDING
        .with(|pending| pending.borrow_mut().take())
        .unwrap_or_default();
    drop(guard);

    trace!(notifications = pending.len(), "Flushing batch");
    for (_, notify) in pending {
        notify();
    }

    result
}

/// Queue a notification for `key` if a batch is open.
///
/// Returns `false` when no batch is open, in which case the caller notifies
/// immediately. A key already queued is not queued twice.
pub(crate) fn defer(key: usize, notify: impl FnOnce() -> PendingNotify) -> bool {
    PENDING.with(|pending| {
        let mut pending = pending.borrow_mut();
        match pending.as_mut() {
            Some(queue) => {
                if !queue.iter().any(|(queued, _)| *queued == key) {
                    queue.push((key, notify()));
                }
                true
            }
            None => false,
        }
    })
}

struct BatchGuard;

impl Drop for BatchGuard {
    fn drop(&mut self) {
        PENDING.with(|pending| pending.borrow_mut().take());
    }
}
