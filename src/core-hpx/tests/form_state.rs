//! Tests for form state handling
//!
//! Covers mode switching, file loading, theme toggling and restoring the form
//! from the persisted store after a reload.

use std::cell::RefCell;

use core_hpx::view::recording::RecordingView;
use core_hpx::{
    Controller, ControllerConfig, Error, Field, FileSource, InMemoryFile, InputMode, KeyValueStore, MemoryStore, Theme,
    load_html_file, models,
};

fn start(store: &MemoryStore) -> Controller<MemoryStore, RecordingView> {
    let mut controller = Controller::new(store.clone(), RecordingView::new(), ControllerConfig::default());
    controller.startup();
    controller
}

//
// Mode switching
//

#[test]
fn test_switching_to_raw_html_disables_and_clears_url() {
    let mut controller = start(&MemoryStore::new());
    controller.on_field_input(Field::Url, "https://example.com");

    controller.on_mode_selected(InputMode::RawHtml);

    let screen = controller.view().screen();
    assert_eq!(screen.mode, Some(InputMode::RawHtml));
    assert!(!screen.is_enabled(Field::Url));
    assert!(screen.is_enabled(Field::RawHtml));
    assert_eq!(screen.field(Field::Url), "");
    assert_eq!(controller.state().url, "");
}

#[test]
fn test_switching_back_to_url_disables_and_clears_raw_html() {
    let mut controller = start(&MemoryStore::new());
    controller.on_mode_selected(InputMode::RawHtml);
    controller.on_field_input(Field::RawHtml, "<p>hello</p>");

    controller.on_mode_selected(InputMode::Url);

    let screen = controller.view().screen();
    assert!(screen.is_enabled(Field::Url));
    assert!(!screen.is_enabled(Field::RawHtml));
    assert_eq!(screen.field(Field::RawHtml), "");
    assert_eq!(controller.state().raw_html, "");
}

#[test]
fn test_clearing_on_mode_switch_does_not_touch_the_store() {
    let store = MemoryStore::new();
    let mut controller = start(&store);
    controller.on_field_input(Field::Url, "https://example.com");

    controller.on_mode_selected(InputMode::RawHtml);

    assert_eq!(store.get("url").as_deref(), Some("https://example.com"));
}

//
// File loading
//

#[tokio::test]
async fn test_dropping_html_file_loads_raw_html_mode() {
    let store = MemoryStore::new();
    let controller = RefCell::new(start(&store));
    controller.borrow_mut().on_field_input(Field::Url, "https://example.com");

    let file = InMemoryFile::html("<html><body>dropped</body></html>");
    load_html_file(&controller, Some(file), FileSource::Drop).await.unwrap();

    let controller = controller.borrow();
    let screen = controller.view().screen();
    assert_eq!(screen.field(Field::RawHtml), "<html><body>dropped</body></html>");
    assert_eq!(screen.mode, Some(InputMode::RawHtml));
    assert_eq!(screen.field(Field::Url), "");
    assert_eq!(controller.state().mode, InputMode::RawHtml);
    assert_eq!(
        screen.notifications,
        vec!["HTML file loaded into raw HTML textarea.".to_string()]
    );
    assert_eq!(
        store.get("rawHtml").as_deref(),
        Some("<html><body>dropped</body></html>")
    );
}

#[tokio::test]
async fn test_dropping_non_html_file_changes_nothing() {
    let controller = RefCell::new(start(&MemoryStore::new()));
    controller.borrow_mut().on_field_input(Field::Url, "https://example.com");
    let before = controller.borrow().state().clone();
    let fields_before = controller.borrow().view().screen().fields;

    let file = InMemoryFile::new("text/plain", "just text");
    let err = load_html_file(&controller, Some(file), FileSource::Drop)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        Error::InvalidFile {
            media_type: Some("text/plain".into())
        }
    );
    let controller = controller.borrow();
    let screen = controller.view().screen();
    assert_eq!(controller.state(), &before);
    assert_eq!(screen.fields, fields_before);
    assert_eq!(screen.notifications, vec!["Please drop a valid HTML file.".to_string()]);
}

#[tokio::test]
async fn test_picker_without_file_is_rejected() {
    let controller = RefCell::new(start(&MemoryStore::new()));

    let result = load_html_file::<_, _, InMemoryFile>(&controller, None, FileSource::Picker).await;

    assert!(result.is_err());
    assert_eq!(
        controller.borrow().view().screen().notifications,
        vec!["Please select a valid HTML file.".to_string()]
    );
    assert_eq!(controller.borrow().state().mode, InputMode::Url);
}

#[tokio::test]
async fn test_unreadable_html_file_is_reported() {
    let controller = RefCell::new(start(&MemoryStore::new()));

    let file = InMemoryFile::unreadable("text/html", "permission denied");
    let err = load_html_file(&controller, Some(file), FileSource::Picker)
        .await
        .unwrap_err();

    assert_eq!(err, Error::FileRead("permission denied".into()));
    assert_eq!(controller.borrow().state().raw_html, "");
    assert_eq!(controller.borrow().view().screen().notifications.len(), 1);
}

//
// Persistence across reloads
//

#[test]
fn test_model_survives_reload() {
    let store = MemoryStore::new();
    let mut controller = start(&store);
    controller.on_field_input(Field::Model, "llama3");
    drop(controller);

    let reloaded = start(&store);
    let screen = reloaded.view().screen();
    assert_eq!(reloaded.state().model, "llama3");
    assert_eq!(screen.field(Field::Model), "llama3");
    assert_eq!(screen.model_description, models::describe("llama3"));
}

#[test]
fn test_url_and_instruction_survive_reload() {
    let store = MemoryStore::new();
    let mut controller = start(&store);
    controller.on_field_input(Field::Url, "https://example.com/product");
    controller.on_field_input(Field::Instruction, "Write an SEO blurb");

    let reloaded = start(&store);
    let screen = reloaded.view().screen();
    assert_eq!(screen.field(Field::Url), "https://example.com/product");
    assert_eq!(screen.field(Field::Instruction), "Write an SEO blurb");
}

#[test]
fn test_reload_starts_in_url_mode_and_clears_raw_html() {
    let store = MemoryStore::with_entries(&[("rawHtml", "<p>kept in store</p>")]);

    let controller = start(&store);

    assert_eq!(controller.state().mode, InputMode::Url);
    assert_eq!(controller.view().screen().field(Field::RawHtml), "");
    assert_eq!(store.get("rawHtml").as_deref(), Some("<p>kept in store</p>"));
}

//
// Theme
//

#[test]
fn test_theme_toggle_round_trip() {
    let store = MemoryStore::new();
    let mut controller = start(&store);
    assert_eq!(controller.view().screen().theme, Some(Theme::Light));

    controller.toggle_theme(true);
    assert_eq!(controller.view().screen().theme, Some(Theme::Dark));
    assert_eq!(store.get("theme").as_deref(), Some("dark"));

    controller.toggle_theme(false);
    assert_eq!(controller.view().screen().theme, Some(Theme::Light));
    assert_eq!(store.get("theme").as_deref(), Some("light"));
}

#[test]
fn test_dark_theme_is_applied_at_startup() {
    let store = MemoryStore::with_entries(&[("theme", "dark")]);
    let controller = start(&store);
    assert_eq!(controller.view().screen().theme, Some(Theme::Dark));
    assert_eq!(controller.state().theme, Theme::Dark);
}

#[tokio::test]
async fn test_unknown_persisted_model_falls_back_to_default() {
    let store = MemoryStore::with_entries(&[("model", "gpt-retired")]);
    let controller = RefCell::new(start(&store));

    {
        let controller = controller.borrow();
        let screen = controller.view().screen();
        assert_eq!(controller.state().model, "nous-hermes");
        assert_eq!(screen.field(Field::Model), "nous-hermes");
        assert_eq!(screen.model_description, models::describe("nous-hermes"));
    }

    let client = core_hpx::process::mock::MockProcessClient::with_output("ok");
    core_hpx::run_submission(&controller, &client).await.unwrap();
    assert_eq!(client.requests()[0].model, "nous-hermes");
}

//
// Persistence failures
//

/// A store whose reads come back empty and whose writes always fail.
struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::Storage("QuotaExceededError".to_string()))
    }
}

#[test]
fn test_failed_writes_still_update_state_and_view() {
    let mut controller = Controller::new(FullStore, RecordingView::new(), ControllerConfig::default());
    controller.startup();

    controller.on_field_input(Field::Instruction, "Summarize");
    controller.on_field_input(Field::Model, "mistral");
    controller.toggle_theme(true);

    let screen = controller.view().screen();
    assert_eq!(controller.state().instruction, "Summarize");
    assert_eq!(controller.state().model, "mistral");
    assert_eq!(screen.model_description, models::describe("mistral"));
    assert_eq!(controller.state().theme, Theme::Dark);
    assert_eq!(screen.theme, Some(Theme::Dark));
}
