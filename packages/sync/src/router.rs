//! Builder path construction.

use crate::mode::BuilderMode;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use url::form_urlencoded;

pub const PAGE_ID_PARAM: &str = "pageId";
pub const PAGE_HASH_PARAM: &str = "pageHash";
pub const MODE_PARAM: &str = "mode";
pub const AUTH_TOKEN_PARAM: &str = "authToken";

pub const DEFAULT_BASE_PATH: &str = "/";

/// Query fields of a builder location; absent fields are left out of the path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderPathParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BuilderMode>,
}

impl BuilderPathParams {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.page_id.is_none()
            && self.auth_token.is_none()
            && self.page_hash.is_none()
            && self.mode.is_none()
    }
}

/// Injected path formatter used by the propagator
pub type PathBuilder = Rc<dyn Fn(&BuilderPathParams) -> String>;

/// Render `base` with the present params as a query string.
///
/// Params are written in the order `pageId`, `authToken`, `pageHash`, `mode`.
pub fn builder_path(base: &str, params: &BuilderPathParams) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(page_id) = &params.page_id {
        query.append_pair(PAGE_ID_PARAM, page_id);
    }
    if let Some(auth_token) = &params.auth_token {
        query.append_pair(AUTH_TOKEN_PARAM, auth_token);
    }
    if let Some(page_hash) = &params.page_hash {
        query.append_pair(PAGE_HASH_PARAM, page_hash);
    }
    if let Some(mode) = params.mode {
        query.append_pair(MODE_PARAM, mode.as_str());
    }

    let query = query.finish();
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

/// A [`PathBuilder`] rooted at `base`
pub fn path_builder(base: impl Into<String>) -> PathBuilder {
    let base = base.into();
    Rc::new(move |params: &BuilderPathParams| builder_path(&base, params))
}
