pub mod dom;
pub mod fetch;
pub mod file;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use core_hpx::{Controller, ControllerConfig, Field, FileSource, InputMode, load_html_file, run_submission};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, DragEvent, Event, EventTarget, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent,
    console,
};

use crate::dom::{DROP_ZONE_ID, DomView, FILE_INPUT_ID, MODE_RADIOS, OUTPUT_ID, SUBMIT_ID, THEME_TOGGLE_ID, element};
use crate::fetch::FetchProcessClient;
use crate::file::WebFile;
use crate::storage::LocalStore;

type WebController = Controller<LocalStore, DomView>;

/// Document element attribute that overrides the processing endpoint.
const ENDPOINT_ATTRIBUTE: &str = "data-process-endpoint";

struct App {
    controller: RefCell<WebController>,
    client: FetchProcessClient,
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console::log_1(&"WASM module initialized!".into());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;

    let config = config_from_document(&document);
    let client = FetchProcessClient::new(&config.endpoint);
    let mut controller = Controller::new(LocalStore::from_window(&window)?, DomView::from_document(&document)?, config);
    controller.startup();

    let app = Rc::new(App {
        controller: RefCell::new(controller),
        client,
    });
    register_listeners(&document, &app)?;
    APP.with(|slot| *slot.borrow_mut() = Some(app));

    Ok(())
}

// ============================================================================
// Functions callable from the page
// ============================================================================

#[wasm_bindgen(js_name = submitData)]
pub fn submit_data() {
    if let Some(app) = current_app() {
        submit(app);
    }
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard() {
    if let Some(app) = current_app() {
        with_controller(&app, |controller| controller.copy_output());
    }
}

#[wasm_bindgen(js_name = downloadOutput)]
pub fn download_output() {
    if let Some(app) = current_app() {
        with_controller(&app, |controller| controller.download_output());
    }
}

#[wasm_bindgen(js_name = setInstruction)]
pub fn set_instruction(text: &str) {
    if let Some(app) = current_app() {
        with_controller(&app, |controller| controller.set_instruction(text));
    }
}

// ============================================================================
// Event wiring
// ============================================================================

fn register_listeners(document: &Document, app: &Rc<App>) -> Result<(), JsValue> {
    for (id, field, event_type) in [
        (dom::URL_ID, Field::Url, "input"),
        (dom::RAW_HTML_ID, Field::RawHtml, "input"),
        (dom::INSTRUCTION_ID, Field::Instruction, "input"),
        (dom::MODEL_ID, Field::Model, "change"),
    ] {
        let app = app.clone();
        let target: EventTarget = element(document, id)?;
        listen(&target, event_type, move |event| {
            if let Some(value) = target_value(&event) {
                with_controller(&app, |controller| controller.on_field_input(field, &value));
            }
        })?;
    }

    let output: EventTarget = element(document, OUTPUT_ID)?;
    let app_output = app.clone();
    listen(&output, "input", move |event| {
        if let Some(value) = target_value(&event) {
            with_controller(&app_output, |controller| controller.on_output_edited(&value));
        }
    })?;

    let radios = document.query_selector_all(MODE_RADIOS)?;
    for i in 0..radios.length() {
        let Some(radio) = radios.get(i) else {
            continue;
        };
        let app = app.clone();
        listen(&radio, "change", move |event| {
            if let Some(mode) = target_value(&event).and_then(|value| InputMode::from_radio_value(&value)) {
                with_controller(&app, |controller| controller.on_mode_selected(mode));
            }
        })?;
    }

    let theme_toggle: HtmlInputElement = element(document, THEME_TOGGLE_ID)?;
    let app_theme = app.clone();
    let toggle = theme_toggle.clone();
    listen(&theme_toggle, "change", move |_| {
        let dark = toggle.checked();
        with_controller(&app_theme, |controller| controller.toggle_theme(dark));
    })?;

    let drop_zone: EventTarget = element(document, DROP_ZONE_ID)?;
    listen(&drop_zone, "dragover", |event| event.prevent_default())?;
    let app_drop = app.clone();
    listen(&drop_zone, "drop", move |event| {
        event.prevent_default();
        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(|drag| drag.data_transfer())
            .and_then(|transfer| transfer.files());
        load_file(app_drop.clone(), WebFile::first(files), FileSource::Drop);
    })?;

    let file_input: HtmlInputElement = element(document, FILE_INPUT_ID)?;
    let app_picker = app.clone();
    let picker = file_input.clone();
    listen(&file_input, "change", move |_| {
        load_file(app_picker.clone(), WebFile::first(picker.files()), FileSource::Picker);
    })?;

    let submit_button: EventTarget = element(document, SUBMIT_ID)?;
    let app_click = app.clone();
    listen(&submit_button, "click", move |_| submit(app_click.clone()))?;

    // Ctrl/Cmd+Enter submits from anywhere on the page
    let app_keys = app.clone();
    listen(document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            if key.key() == "Enter" && (key.ctrl_key() || key.meta_key()) {
                event.prevent_default();
                submit(app_keys.clone());
            }
        }
    })?;

    Ok(())
}

fn listen<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn submit(app: Rc<App>) {
    spawn_local(async move {
        if let Err(e) = run_submission(&app.controller, &app.client).await {
            console::log_1(&format!("Submission skipped: {}", e).into());
        }
    });
}

fn load_file(app: Rc<App>, file: Option<WebFile>, source: FileSource) {
    spawn_local(async move {
        if let Err(e) = load_html_file(&app.controller, file, source).await {
            console::log_1(&format!("File not loaded: {}", e).into());
        }
    });
}

// ============================================================================
// Helpers
// ============================================================================

fn current_app() -> Option<Rc<App>> {
    APP.with(|slot| slot.borrow().clone())
}

/// Runs `f` against the controller unless another handler is mid-update.
fn with_controller<F>(app: &App, f: F)
where
    F: FnOnce(&mut WebController),
{
    match app.controller.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => console::error_1(&"Controller busy, dropping event".into()),
    }
}

fn config_from_document(document: &Document) -> ControllerConfig {
    let config = ControllerConfig::default();
    match document
        .document_element()
        .and_then(|root| root.get_attribute(ENDPOINT_ATTRIBUTE))
    {
        Some(endpoint) => config.with_endpoint(&endpoint),
        None => config,
    }
}

/// Current value of the element an event fired on.
fn target_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

/// Best-effort human-readable message of a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
