//! Page catalog reference data.

use crate::errors::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub path: String,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Loaded set of pages with a distinguished home page.
///
/// The home page is not repeated in `pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCatalog {
    pub home_page: Page,

    #[serde(default)]
    pub pages: Vec<Page>,
}

impl PageCatalog {
    pub fn new(home_page: Page, pages: Vec<Page>) -> Self {
        Self { home_page, pages }
    }

    /// Parse a catalog from its JSON form
    pub fn from_json(json: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn home_page_id(&self) -> &str {
        &self.home_page.id
    }

    /// Find the home page or any other page by id
    pub fn find(&self, page_id: &str) -> Option<&Page> {
        self.iter().find(|page| page.id == page_id)
    }

    /// Like [`find`](Self::find), but unknown ids are an error
    pub fn require(&self, page_id: &str) -> SyncResult<&Page> {
        self.find(page_id)
            .ok_or_else(|| SyncError::UnknownPage(page_id.to_string()))
    }

    /// Home page followed by the other pages
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        std::iter::once(&self.home_page).chain(self.pages.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PageCatalog {
        PageCatalog::new(
            Page::new("P1", "Home", "/"),
            vec![Page::new("P2", "About", "/about")],
        )
    }

    #[test]
    fn test_find_includes_home_page() {
        let catalog = catalog();
        assert_eq!(catalog.find("P1").map(|p| p.name.as_str()), Some("Home"));
        assert_eq!(catalog.find("P2").map(|p| p.path.as_str()), Some("/about"));
        assert!(catalog.find("P3").is_none());
        assert_eq!(catalog.iter().count(), 2);
    }

    #[test]
    fn test_require_reports_unknown_page() {
        let err = catalog().require("P9").unwrap_err();
        assert!(matches!(err, SyncError::UnknownPage(ref id) if id == "P9"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "homePage": { "id": "home", "name": "Home", "path": "" },
            "pages": [{ "id": "blog", "name": "Blog", "path": "/blog" }]
        }"#;

        let catalog = PageCatalog::from_json(json).unwrap();
        assert_eq!(catalog.home_page_id(), "home");
        assert_eq!(catalog.pages.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_missing_home_page() {
        let result = PageCatalog::from_json(r#"{ "pages": [] }"#);
        assert!(matches!(result, Err(SyncError::Catalog(_))));
    }
}
