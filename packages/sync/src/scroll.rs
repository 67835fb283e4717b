//! # Scroll-Anchor Reconciler
//!
//! Keeps the view scrolled to the selected page hash, the way a browser
//! handles a URL fragment:
//!
//! - empty hash: do nothing (no scroll-to-top)
//! - hash names no element: do nothing
//! - otherwise: scroll that element into view

use crate::document::DocumentView;
use builder_store::{Atom, Subscription};
use std::rc::Rc;
use tracing::{debug, trace, warn};
use urlencoding::decode;

/// Element id a page hash points at.
///
/// The hash is percent-decoded and one leading `#` is dropped. Returns `None`
/// for an empty hash, a malformed escape, or one that does not decode to
/// UTF-8.
pub fn anchor_element_id(page_hash: &str) -> Option<String> {
    if page_hash.is_empty() {
        return None;
    }

    if !has_valid_escapes(page_hash) {
        warn!(page_hash, "Page hash has a malformed percent escape");
        return None;
    }

    let decoded = match decode(page_hash) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(page_hash, error = %err, "Page hash is not valid UTF-8 once decoded");
            return None;
        }
    };

    let element_id = decoded.strip_prefix('#').unwrap_or(&*decoded);
    Some(element_id.to_string())
}

/// Every `%` must start a two-digit hex escape
fn has_valid_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !matches!(escape, Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Scroll to the element `page_hash` points at; returns whether it did
pub fn scroll_to_page_hash<D>(document: &D, page_hash: &str) -> bool
where
    D: DocumentView + ?Sized,
{
    let Some(element_id) = anchor_element_id(page_hash) else {
        return false;
    };

    match document.element_by_id(&element_id) {
        Some(element) => {
            debug!(element_id = %element_id, "Scrolling to page hash");
            document.scroll_into_view(&element);
            true
        }
        None => {
            trace!(element_id = %element_id, "No element for page hash");
            false
        }
    }
}

/// Mounted reconciler: runs once on mount and then on every page hash change
pub struct HashLinkSync {
    subscription: Subscription,
}

impl HashLinkSync {
    pub fn mount<D>(document: Rc<D>, page_hash: &Atom<String>) -> Self
    where
        D: DocumentView + 'static,
    {
        scroll_to_page_hash(document.as_ref(), &page_hash.get());

        let subscription = page_hash.listen(move |hash| {
            scroll_to_page_hash(document.as_ref(), hash);
        });

        Self { subscription }
    }

    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}
