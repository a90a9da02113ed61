use core_hpx::{Field, InputMode, Theme, View};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Url, console,
};

// ============================================================================
// Element ids
// ============================================================================

pub const URL_ID: &str = "url";
pub const RAW_HTML_ID: &str = "rawHtml";
pub const INSTRUCTION_ID: &str = "instruction";
pub const MODEL_ID: &str = "model";
pub const MODEL_DESCRIPTION_ID: &str = "model-description";
pub const URL_WRAPPER_ID: &str = "urlInputWrapper";
pub const RAW_HTML_WRAPPER_ID: &str = "rawHtmlWrapper";
pub const OUTPUT_ID: &str = "output";
pub const SUBMIT_ID: &str = "submit-button";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const DROP_ZONE_ID: &str = "drop-zone";
pub const FILE_INPUT_ID: &str = "fileInput";

/// Selector for the input mode radio group.
pub const MODE_RADIOS: &str = "input[name=\"inputType\"]";
const MODE_OPTION_LABELS: &str = ".input-mode-option";

/// Looks up an element by id and casts it to the expected type.
pub fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing #{} element", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has an unexpected element type", id)))
}

// ============================================================================
// View
// ============================================================================

/// The real page.
pub struct DomView {
    document: Document,
    url: HtmlInputElement,
    raw_html: HtmlTextAreaElement,
    instruction: HtmlInputElement,
    model: HtmlSelectElement,
    model_description: HtmlElement,
    url_wrapper: HtmlElement,
    raw_html_wrapper: HtmlElement,
    output: HtmlTextAreaElement,
    submit: HtmlButtonElement,
    theme_toggle: HtmlInputElement,
}

impl DomView {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            url: element(document, URL_ID)?,
            raw_html: element(document, RAW_HTML_ID)?,
            instruction: element(document, INSTRUCTION_ID)?,
            model: element(document, MODEL_ID)?,
            model_description: element(document, MODEL_DESCRIPTION_ID)?,
            url_wrapper: element(document, URL_WRAPPER_ID)?,
            raw_html_wrapper: element(document, RAW_HTML_WRAPPER_ID)?,
            output: element(document, OUTPUT_ID)?,
            submit: element(document, SUBMIT_ID)?,
            theme_toggle: element(document, THEME_TOGGLE_ID)?,
        })
    }

    fn try_show_mode(&self, mode: InputMode) -> Result<(), JsValue> {
        let url_active = mode == InputMode::Url;

        set_displayed(&self.url_wrapper, url_active)?;
        self.url.set_disabled(!url_active);
        set_displayed(&self.raw_html_wrapper, !url_active)?;
        self.raw_html.set_disabled(url_active);

        let selector = format!("{}[value=\"{}\"]", MODE_RADIOS, mode.radio_value());
        if let Some(radio) = self.document.query_selector(&selector)? {
            radio.dyn_into::<HtmlInputElement>()?.set_checked(true);
        }

        // Highlight the label wrapping the checked radio
        let labels = self.document.query_selector_all(MODE_OPTION_LABELS)?;
        for i in 0..labels.length() {
            let Some(label) = labels.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            let checked = match label.query_selector("input")? {
                Some(input) => input.dyn_into::<HtmlInputElement>()?.checked(),
                None => false,
            };
            if checked {
                label.class_list().add_1("active")?;
            } else {
                label.class_list().remove_1("active")?;
            }
        }

        Ok(())
    }

    fn try_autosize_output(&self) -> Result<(), JsValue> {
        let style = self.output.style();
        style.set_property("height", "auto")?;
        style.set_property("height", &format!("{}px", self.output.scroll_height()))?;
        Ok(())
    }

    fn try_apply_theme(&self, theme: Theme) -> Result<(), JsValue> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        root.set_attribute("data-theme", theme.as_str())?;
        self.theme_toggle.set_checked(theme.is_dark());
        Ok(())
    }

    fn try_offer_download(&self, file_name: &str, contents: &str) -> Result<(), JsValue> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = BlobPropertyBag::new();
        options.set_type("text/plain");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

        let href = Url::create_object_url_with_blob(&blob)?;
        let link = self.document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
        link.set_href(&href);
        link.set_download(file_name);
        link.click();
        Url::revoke_object_url(&href)?;

        Ok(())
    }
}

impl View for DomView {
    fn set_field_value(&self, field: Field, value: &str) {
        match field {
            Field::Url => self.url.set_value(value),
            Field::RawHtml => self.raw_html.set_value(value),
            Field::Instruction => self.instruction.set_value(value),
            Field::Model => self.model.set_value(value),
        }
    }

    fn show_mode(&self, mode: InputMode) {
        log_failure("show input mode", self.try_show_mode(mode));
    }

    fn set_model_description(&self, text: &str) {
        self.model_description.set_inner_text(text);
    }

    fn set_output(&self, text: &str) {
        self.output.set_value(text);
    }

    fn autosize_output(&self) {
        log_failure("resize output", self.try_autosize_output());
    }

    fn set_submit_control(&self, enabled: bool, label: &str) {
        self.submit.set_disabled(!enabled);
        self.submit.set_inner_text(label);
    }

    fn apply_theme(&self, theme: Theme) {
        log_failure("apply theme", self.try_apply_theme(theme));
    }

    fn notify(&self, message: &str) {
        alert(message);
    }

    fn copy_to_clipboard(&self, text: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().clipboard().write_text(text);

        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => alert("Copied to clipboard!"),
                Err(e) => console::error_1(&format!("Clipboard write failed: {:?}", e).into()),
            }
        });
    }

    fn offer_download(&self, file_name: &str, contents: &str) {
        log_failure("offer download", self.try_offer_download(file_name, contents));
    }
}

fn set_displayed(element: &HtmlElement, displayed: bool) -> Result<(), JsValue> {
    element
        .style()
        .set_property("display", if displayed { "block" } else { "none" })
}

fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => log_failure("show alert", window.alert_with_message(message)),
        None => console::error_1(&format!("No window to alert: {}", message).into()),
    }
}

fn log_failure(action: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        console::error_1(&format!("Failed to {}: {:?}", action, e).into());
    }
}
