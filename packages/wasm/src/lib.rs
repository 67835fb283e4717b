mod browser;

pub use browser::{BrowserDocument, BrowserHistory};

use builder_sync::{
    path_builder, try_parse_mode, BuilderState, DocumentView, HashLinkSync, PageCatalog,
    PageUrlSync, SharedHistory, DEFAULT_BASE_PATH,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Builder state kept in step with the browser location
#[wasm_bindgen]
pub struct BuilderSync {
    state: BuilderState,
    page_url: Option<PageUrlSync>,
    hash_link: Option<HashLinkSync>,
}

#[wasm_bindgen]
impl BuilderSync {
    /// Mount against the current window
    #[wasm_bindgen(constructor)]
    pub fn new(base_path: Option<String>) -> Result<BuilderSync, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        Ok(Self::attach(
            Rc::new(BrowserHistory::new(window)),
            Rc::new(BrowserDocument::new(document)),
            base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH),
        ))
    }

    /// Install the page catalog from its JSON form
    #[wasm_bindgen(js_name = loadPages)]
    pub fn load_pages(&self, json: &str) -> Result<(), JsValue> {
        let catalog = PageCatalog::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid page catalog: {}", e)))?;
        self.state.load_pages(catalog);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectPage)]
    pub fn select_page(&self, page_id: &str) {
        self.state.select_page(page_id);
    }

    /// Set the builder mode; `undefined` selects the default mode
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: Option<String>) -> Result<(), JsValue> {
        let mode = try_parse_mode(mode.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.state.set_builder_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = setPageHash)]
    pub fn set_page_hash(&self, page_hash: &str) {
        self.state.selected_page_hash.set(page_hash.to_string());
    }

    #[wasm_bindgen(js_name = setAuthToken)]
    pub fn set_auth_token(&self, auth_token: Option<String>) {
        self.state.auth_token.set(auth_token);
    }

    #[wasm_bindgen(getter, js_name = selectedPageId)]
    pub fn selected_page_id(&self) -> Option<String> {
        self.state.selected_page().map(|page| page.id)
    }

    #[wasm_bindgen(getter, js_name = pageHash)]
    pub fn page_hash(&self) -> String {
        self.state.selected_page_hash.get()
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.state.builder_mode.get().to_string()
    }

    #[wasm_bindgen(getter, js_name = isWaitingForPages)]
    pub fn is_waiting_for_pages(&self) -> bool {
        self.page_url
            .as_ref()
            .map(PageUrlSync::is_waiting_for_pages)
            .unwrap_or(false)
    }

    /// Stop syncing; later state changes no longer reach the location
    pub fn unmount(&mut self) {
        if let Some(page_url) = self.page_url.take() {
            page_url.unmount();
        }
        if let Some(hash_link) = self.hash_link.take() {
            hash_link.unmount();
        }
    }
}

impl BuilderSync {
    /// Mount against any history and view
    pub fn attach<D>(history: SharedHistory, document: Rc<D>, base_path: &str) -> Self
    where
        D: DocumentView + 'static,
    {
        let state = BuilderState::new();
        let page_url = PageUrlSync::mount_with(history, &state, path_builder(base_path));
        let hash_link = HashLinkSync::mount(document, &state.selected_page_hash);

        Self {
            state,
            page_url: Some(page_url),
            hash_link: Some(hash_link),
        }
    }
}
