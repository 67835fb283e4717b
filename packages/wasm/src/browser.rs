//! `History` and `DocumentView` backed by the browser window.

use builder_sync::{DocumentView, History, Subscription};
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

const POP_STATE_EVENT: &str = "popstate";

pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl History for BrowserHistory {
    fn search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        let result = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));

        if let Err(err) = result {
            warn!(path, ?err, "pushState failed");
        }
    }

    fn listen_pop_state(&self, listener: Rc<dyn Fn()>) -> Subscription {
        let callback = Closure::<dyn Fn()>::new(move || listener());
        let window = self.window.clone();

        if let Err(err) = window
            .add_event_listener_with_callback(POP_STATE_EVENT, callback.as_ref().unchecked_ref())
        {
            warn!(?err, "Could not listen for popstate");
            return Subscription::empty();
        }

        Subscription::new(move || {
            // Dropping `callback` here frees the JS function
            if let Err(err) = window
                .remove_event_listener_with_callback(POP_STATE_EVENT, callback.as_ref().unchecked_ref())
            {
                warn!(?err, "Could not remove popstate listener");
            }
        })
    }
}

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl DocumentView for BrowserDocument {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn scroll_into_view(&self, element: &Element) {
        element.scroll_into_view();
    }
}
