//! A [`View`] that renders nothing and remembers everything.
//!
//! Used by tests to assert on what the page would show.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::state::{Field, InputMode, Theme};
use crate::view::View;

/// Everything a [`RecordingView`] has been told so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub fields: HashMap<&'static str, String>,
    pub mode: Option<InputMode>,
    pub model_description: String,
    pub output: String,
    pub output_resizes: usize,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub theme: Option<Theme>,
    pub notifications: Vec<String>,
    pub clipboard: Option<String>,
    pub downloads: Vec<(String, String)>,
}

impl Screen {
    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field.storage_key()).map(String::as_str).unwrap_or("")
    }

    /// Whether the field is enabled, judged from the last shown mode.
    pub fn is_enabled(&self, field: Field) -> bool {
        match (field, self.mode) {
            (Field::Instruction | Field::Model, _) => true,
            (_, Some(mode)) => mode.active_field() == field,
            (_, None) => false,
        }
    }
}

/// Shared handle: clones observe the same [`Screen`].
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    screen: Rc<RefCell<Screen>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current screen.
    pub fn screen(&self) -> Screen {
        self.screen.borrow().clone()
    }
}

impl View for RecordingView {
    fn set_field_value(&self, field: Field, value: &str) {
        self.screen
            .borrow_mut()
            .fields
            .insert(field.storage_key(), value.to_string());
    }

    fn show_mode(&self, mode: InputMode) {
        self.screen.borrow_mut().mode = Some(mode);
    }

    fn set_model_description(&self, text: &str) {
        self.screen.borrow_mut().model_description = text.to_string();
    }

    fn set_output(&self, text: &str) {
        self.screen.borrow_mut().output = text.to_string();
    }

    fn autosize_output(&self) {
        self.screen.borrow_mut().output_resizes += 1;
    }

    fn set_submit_control(&self, enabled: bool, label: &str) {
        let mut screen = self.screen.borrow_mut();
        screen.submit_enabled = enabled;
        screen.submit_label = label.to_string();
    }

    fn apply_theme(&self, theme: Theme) {
        self.screen.borrow_mut().theme = Some(theme);
    }

    fn notify(&self, message: &str) {
        self.screen.borrow_mut().notifications.push(message.to_string());
    }

    fn copy_to_clipboard(&self, text: &str) {
        self.screen.borrow_mut().clipboard = Some(text.to_string());
    }

    fn offer_download(&self, file_name: &str, contents: &str) {
        self.screen
            .borrow_mut()
            .downloads
            .push((file_name.to_string(), contents.to_string()));
    }
}
