//! End-to-end scenarios for location <-> state sync

use builder_sync::{
    builder_path, decode_location, encode_location, hydrate_from_location, BuilderMode,
    BuilderState, HashLinkSync, History, MemoryDocument, MemoryHistory, Page, PageCatalog, PageLocation,
    PageUrlSync, SearchParams,
};
use std::rc::Rc;

fn catalog() -> PageCatalog {
    PageCatalog::new(
        Page::new("P1", "Home", "/"),
        vec![
            Page::new("P2", "Pricing", "/pricing"),
            Page::new("P3", "Blog", "/blog"),
        ],
    )
}

struct Harness {
    history: Rc<MemoryHistory>,
    document: Rc<MemoryDocument>,
    state: BuilderState,
    page_url: Option<PageUrlSync>,
    hash_link: Option<HashLinkSync>,
}

impl Harness {
    fn mount(location: &str, elements: &[&str]) -> Self {
        let history = Rc::new(MemoryHistory::new(location));
        let document = Rc::new(MemoryDocument::with_elements(elements.iter().copied()));
        let state = BuilderState::new();

        let page_url = PageUrlSync::mount(history.clone(), &state);
        let hash_link = HashLinkSync::mount(document.clone(), &state.selected_page_hash);

        Self {
            history,
            document,
            state,
            page_url: Some(page_url),
            hash_link: Some(hash_link),
        }
    }

    fn selected_page_id(&self) -> Option<String> {
        self.state.selected_page().map(|page| page.id)
    }
}

#[test]
fn test_scenario_a_hydrate_then_return_to_default_mode() {
    let harness = Harness::mount("/?pageId=P2&mode=content", &[]);
    harness.state.load_pages(catalog());

    assert_eq!(harness.selected_page_id().as_deref(), Some("P2"));
    assert_eq!(harness.state.builder_mode.get(), BuilderMode::Content);
    assert_eq!(harness.state.selected_page_hash.get(), "");
    assert_eq!(harness.history.navigation_count(), 0);

    harness.state.set_builder_mode(Some(BuilderMode::Design));

    assert_eq!(harness.history.navigation_count(), 1);
    assert_eq!(harness.history.current(), "/?pageId=P2");
}

#[test]
fn test_scenario_b_empty_location_matches_defaults() {
    let harness = Harness::mount("/", &[]);
    harness.state.load_pages(catalog());

    assert_eq!(harness.selected_page_id().as_deref(), Some("P1"));
    assert_eq!(harness.state.builder_mode.get(), BuilderMode::Design);
    assert_eq!(harness.state.selected_page_hash.get(), "");
    assert_eq!(harness.history.navigation_count(), 0);
    assert_eq!(harness.history.entries(), vec!["/".to_string()]);
}

#[test]
fn test_scenario_c_encoded_hash_scrolls_to_element() {
    let harness = Harness::mount("/", &["section-1"]);
    harness.state.load_pages(catalog());

    harness.state.selected_page_hash.set("%23section-1".to_string());

    assert_eq!(harness.document.scrolled(), vec!["section-1".to_string()]);
}

#[test]
fn test_scenario_c_missing_element_does_not_scroll() {
    let harness = Harness::mount("/", &["other"]);
    harness.state.load_pages(catalog());

    harness.state.selected_page_hash.set("%23section-1".to_string());

    assert!(harness.document.scrolled().is_empty());
    // The hash still reaches the location
    assert_eq!(harness.history.current(), "/?pageHash=%2523section-1");
}

#[test]
fn test_scenario_d_back_scrolls_to_restored_hash() {
    let harness = Harness::mount("/?pageHash=features", &["features", "intro"]);
    harness.state.load_pages(catalog());
    assert_eq!(harness.document.last_scrolled().as_deref(), Some("features"));

    harness.state.selected_page_hash.set("intro".to_string());
    assert_eq!(harness.history.current(), "/?pageHash=intro");
    assert_eq!(harness.document.last_scrolled().as_deref(), Some("intro"));

    assert!(harness.history.back());

    assert_eq!(harness.state.selected_page_hash.get(), "features");
    assert_eq!(harness.document.last_scrolled().as_deref(), Some("features"));
    // Restoring an entry never pushes a new one
    assert_eq!(harness.history.navigation_count(), 1);
    assert_eq!(harness.history.len(), 2);
}

#[test]
fn test_hydration_does_not_navigate() {
    let harness = Harness::mount("/?pageId=P3&pageHash=latest&mode=preview", &[]);
    harness.state.load_pages(catalog());

    assert_eq!(harness.selected_page_id().as_deref(), Some("P3"));
    assert_eq!(harness.state.selected_page_hash.get(), "latest");
    assert_eq!(harness.state.builder_mode.get(), BuilderMode::Preview);
    assert_eq!(harness.history.navigation_count(), 0);
}

#[test]
fn test_hydration_over_existing_state_does_not_navigate() {
    let history = Rc::new(MemoryHistory::new("/?pageId=P2&mode=content"));
    let state = BuilderState::new();
    state.load_pages(catalog());
    state.select_page("P1");
    state.selected_page_hash.set("stale".to_string());

    // Catalog already loaded: hydration runs during mount
    let _page_url = PageUrlSync::mount(history.clone(), &state);

    assert_eq!(state.selected_page().map(|page| page.id).as_deref(), Some("P2"));
    assert_eq!(state.selected_page_hash.get(), "");
    assert_eq!(history.navigation_count(), 0);
}

#[test]
fn test_repeated_pop_state_never_loops() {
    let harness = Harness::mount("/", &[]);
    harness.state.load_pages(catalog());
    harness.state.select_page("P2");
    harness.state.set_builder_mode(Some(BuilderMode::Content));
    assert_eq!(harness.history.navigation_count(), 2);

    for _ in 0..10 {
        harness.history.back();
        harness.history.forward();
    }

    assert_eq!(harness.history.navigation_count(), 2);
    assert_eq!(harness.history.current(), "/?pageId=P2&mode=content");
    assert_eq!(harness.state.builder_mode.get(), BuilderMode::Content);
}

#[test]
fn test_identical_hydrations_never_navigate() {
    let harness = Harness::mount("/?pageId=P3&pageHash=latest&mode=content", &["latest"]);
    harness.state.load_pages(catalog());
    assert_eq!(harness.document.scrolled(), vec!["latest".to_string()]);

    for _ in 0..20 {
        let location = hydrate_from_location(&*harness.history, &harness.state);
        assert_eq!(
            location,
            Some(PageLocation::new("P3", "latest", BuilderMode::Content))
        );
    }

    assert_eq!(harness.history.navigation_count(), 0);
    assert_eq!(harness.history.entries().len(), 1);
    assert_eq!(harness.document.scrolled().len(), 1);
}

#[test]
fn test_back_to_home_restores_defaults() {
    let harness = Harness::mount("/", &[]);
    harness.state.load_pages(catalog());
    harness.state.select_page("P3");
    harness.state.set_builder_mode(Some(BuilderMode::Preview));

    harness.history.go(-2);

    assert_eq!(harness.selected_page_id().as_deref(), Some("P1"));
    assert_eq!(harness.state.builder_mode.get(), BuilderMode::Design);
    assert_eq!(harness.history.navigation_count(), 2);
}

#[test]
fn test_auth_token_rides_along() {
    let harness = Harness::mount("/", &[]);
    harness.state.auth_token.set(Some("share-123".to_string()));
    harness.state.load_pages(catalog());

    harness.state.select_page("P2");

    assert_eq!(harness.history.current(), "/?pageId=P2&authToken=share-123");
}

#[test]
fn test_selecting_home_page_drops_page_id() {
    let harness = Harness::mount("/?pageId=P2", &[]);
    harness.state.load_pages(catalog());

    harness.state.select_page("P1");

    assert_eq!(harness.history.current(), "/");
}

#[test]
fn test_unknown_page_id_defers_propagation() {
    let harness = Harness::mount("/?pageId=gone", &[]);
    harness.state.load_pages(catalog());

    assert!(harness.selected_page_id().is_none());

    harness.state.set_builder_mode(Some(BuilderMode::Content));
    assert_eq!(harness.history.navigation_count(), 0);

    harness.state.select_page("P3");
    assert_eq!(harness.history.current(), "/?pageId=P3&mode=content");
}

#[test]
#[should_panic(expected = "Invalid search param mode: legacy")]
fn test_unknown_mode_in_location_is_fatal() {
    let harness = Harness::mount("/?mode=legacy", &[]);
    harness.state.load_pages(catalog());
}

#[test]
fn test_teardown_stops_all_reactions() {
    let mut harness = Harness::mount("/", &["intro"]);
    harness.state.load_pages(catalog());

    if let Some(page_url) = harness.page_url.take() {
        page_url.unmount();
    }
    if let Some(hash_link) = harness.hash_link.take() {
        hash_link.unmount();
    }

    harness.state.selected_page_hash.set("intro".to_string());
    harness.history.navigate("/?mode=preview");
    harness.history.back();

    assert_eq!(harness.history.navigation_count(), 1);
    assert!(harness.document.scrolled().is_empty());
    assert_eq!(harness.state.builder_mode.get(), BuilderMode::Design);
}

#[test]
fn test_non_default_location_round_trips() {
    let catalog = catalog();
    let locations = [
        PageLocation::new("P2", "intro", BuilderMode::Content),
        PageLocation::new("P3", "#faq", BuilderMode::Preview),
    ];

    for location in locations {
        let params = encode_location(&location, catalog.home_page_id(), None);
        let path = builder_path("/", &params);
        let decoded = decode_location(&SearchParams::parse(builder_sync::search_of(&path)), &catalog);
        assert_eq!(decoded, location);
    }
}

#[test]
fn test_default_location_encodes_to_nothing() {
    let params = encode_location(&PageLocation::new("P1", "", BuilderMode::Design), "P1", None);
    assert!(params.is_empty());
    assert_eq!(builder_path("/", &params), "/");
}
