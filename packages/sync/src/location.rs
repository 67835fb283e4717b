//! # Location Codec
//!
//! Reads and writes the three tracked fields to and from a location's query
//! string.
//!
//! | param | field | default when absent |
//! |---|---|---|
//! | `pageId` | page id | the catalog's home page |
//! | `pageHash` | scroll anchor | `""` |
//! | `mode` | builder mode | [`BuilderMode::Design`] |
//!
//! Defaults are never written back: encoding leaves out any field equal to
//! its default.

use crate::errors::SyncResult;
use crate::mode::{parse_mode_or_absent, parse_mode_strict, try_parse_mode, BuilderMode};
use crate::pages::PageCatalog;
use crate::router::{BuilderPathParams, MODE_PARAM, PAGE_HASH_PARAM, PAGE_ID_PARAM};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

/// Parsed query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Parse a query string, with or without its leading `?`
    pub fn parse(search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        }
    }

    /// Parse the query of an absolute URL
    pub fn from_url(url: &str) -> SyncResult<Self> {
        let url = Url::parse(url)?;
        Ok(Self::parse(url.query().unwrap_or("")))
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The state triple a location stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLocation {
    pub page_id: String,
    pub page_hash: String,
    pub mode: BuilderMode,
}

impl PageLocation {
    pub fn new(page_id: impl Into<String>, page_hash: impl Into<String>, mode: BuilderMode) -> Self {
        Self {
            page_id: page_id.into(),
            page_hash: page_hash.into(),
            mode,
        }
    }
}

/// Decode, reporting an unknown mode as [`SyncError::Mode`](crate::SyncError::Mode)
pub fn try_decode_location(params: &SearchParams, catalog: &PageCatalog) -> SyncResult<PageLocation> {
    let mode = try_parse_mode(params.get(MODE_PARAM))?;
    Ok(with_defaults(params, catalog, mode))
}

/// Decode for hydration.
///
/// # Panics
///
/// Panics when the `mode` param is present but not a builder mode.
pub fn decode_location(params: &SearchParams, catalog: &PageCatalog) -> PageLocation {
    let mode = parse_mode_strict(params.get(MODE_PARAM));
    with_defaults(params, catalog, mode)
}

/// Decode for comparison; an unknown mode reads as the default mode
pub fn peek_location(params: &SearchParams, catalog: &PageCatalog) -> PageLocation {
    let mode = parse_mode_or_absent(params.get(MODE_PARAM));
    with_defaults(params, catalog, mode)
}

fn with_defaults(params: &SearchParams, catalog: &PageCatalog, mode: Option<BuilderMode>) -> PageLocation {
    PageLocation {
        page_id: params
            .get(PAGE_ID_PARAM)
            .unwrap_or_else(|| catalog.home_page_id())
            .to_string(),
        page_hash: params.get(PAGE_HASH_PARAM).unwrap_or_default().to_string(),
        mode: mode.unwrap_or_default(),
    }
}

/// Build the path params for `location`, leaving out defaults.
///
/// The auth token is carried through as given.
pub fn encode_location(
    location: &PageLocation,
    home_page_id: &str,
    auth_token: Option<String>,
) -> BuilderPathParams {
    BuilderPathParams {
        page_id: (location.page_id != home_page_id).then(|| location.page_id.clone()),
        auth_token,
        page_hash: (!location.page_hash.is_empty()).then(|| location.page_hash.clone()),
        mode: (!location.mode.is_default()).then_some(location.mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SyncError;
    use crate::mode::InvalidModeError;
    use crate::pages::Page;
    use crate::router::builder_path;

    fn catalog() -> PageCatalog {
        PageCatalog::new(Page::new("P1", "Home", "/"), vec![Page::new("P2", "About", "/about")])
    }

    #[test]
    fn test_search_params_first_value_wins() {
        let params = SearchParams::parse("?pageId=P2&pageId=P3&pageHash=a+b");
        assert_eq!(params.get("pageId"), Some("P2"));
        assert_eq!(params.get("pageHash"), Some("a b"));
        assert_eq!(params.get("mode"), None);
        assert!(SearchParams::parse("").is_empty());
        assert!(SearchParams::parse("?").is_empty());
    }

    #[test]
    fn test_search_params_from_url() {
        let params = SearchParams::from_url("https://example.com/builder?mode=preview#top").unwrap();
        assert_eq!(params.get("mode"), Some("preview"));
        assert!(SearchParams::from_url("not a url").is_err());
    }

    #[test]
    fn test_decode_defaults() {
        let location = decode_location(&SearchParams::parse(""), &catalog());
        assert_eq!(location, PageLocation::new("P1", "", BuilderMode::Design));
    }

    #[test]
    fn test_decode_present_fields() {
        let params = SearchParams::parse("?pageId=P2&pageHash=intro&mode=content");
        let location = decode_location(&params, &catalog());
        assert_eq!(location, PageLocation::new("P2", "intro", BuilderMode::Content));
    }

    #[test]
    #[should_panic(expected = "Invalid search param mode: edit")]
    fn test_decode_panics_on_unknown_mode() {
        decode_location(&SearchParams::parse("?mode=edit"), &catalog());
    }

    #[test]
    fn test_try_decode_reports_unknown_mode() {
        let result = try_decode_location(&SearchParams::parse("?mode=edit"), &catalog());
        assert!(matches!(result, Err(SyncError::Mode(InvalidModeError(ref mode))) if mode == "edit"));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid search param mode: edit"
        );
    }

    #[test]
    fn test_peek_treats_unknown_mode_as_default() {
        let params = SearchParams::parse("?pageId=P2&mode=edit");
        let location = peek_location(&params, &catalog());
        assert_eq!(location, PageLocation::new("P2", "", BuilderMode::Design));
    }

    #[test]
    fn test_encode_suppresses_defaults() {
        let params = encode_location(&PageLocation::new("P1", "", BuilderMode::Design), "P1", None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_encode_carries_auth_token() {
        let params = encode_location(
            &PageLocation::new("P1", "", BuilderMode::Design),
            "P1",
            Some("secret".to_string()),
        );
        assert_eq!(params.auth_token.as_deref(), Some("secret"));
        assert!(params.page_id.is_none());
    }

    #[test]
    fn test_encode_then_decode_restores_location() {
        let catalog = catalog();
        let locations = [
            PageLocation::new("P2", "intro", BuilderMode::Content),
            PageLocation::new("P2", "%23section-1", BuilderMode::Preview),
            PageLocation::new("P2", "two words & more", BuilderMode::Content),
        ];

        for location in locations {
            let path = builder_path("/", &encode_location(&location, "P1", None));
            let search = path.trim_start_matches('/');
            assert_eq!(decode_location(&SearchParams::parse(search), &catalog), location);
        }
    }
}
