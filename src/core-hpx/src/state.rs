use tracing::warn;

use crate::config::ControllerConfig;
use crate::models;
use crate::store::{KeyValueStore, THEME_KEY};
use crate::Error;

//
// Input mode
//

/// Which of the two mutually exclusive inputs feeds the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Url,
    RawHtml,
}

impl InputMode {
    /// The `value` of the matching radio button.
    pub fn radio_value(&self) -> &'static str {
        match self {
            InputMode::Url => "url",
            InputMode::RawHtml => "raw",
        }
    }

    pub fn from_radio_value(value: &str) -> Option<Self> {
        match value {
            "url" => Some(InputMode::Url),
            "raw" => Some(InputMode::RawHtml),
            _ => None,
        }
    }

    /// The field that is enabled in this mode.
    pub fn active_field(&self) -> Field {
        match self {
            InputMode::Url => Field::Url,
            InputMode::RawHtml => Field::RawHtml,
        }
    }

    /// The field that is disabled and cleared in this mode.
    pub fn inactive_field(&self) -> Field {
        match self {
            InputMode::Url => Field::RawHtml,
            InputMode::RawHtml => Field::Url,
        }
    }
}

//
// Theme
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value of the document theme attribute, also the persisted value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Theme selected by the toggle switch's checked state.
    pub fn from_toggle(checked: bool) -> Self {
        if checked { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

//
// Persisted fields
//

/// A form field whose value is persisted across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    RawHtml,
    Instruction,
    Model,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Url, Field::RawHtml, Field::Instruction, Field::Model];

    /// Key in the persisted store.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::RawHtml => "rawHtml",
            Field::Instruction => "instruction",
            Field::Model => "model",
        }
    }
}

//
// UI state
//

/// Everything the page shows, mirrored in one place.
///
/// `url`, `raw_html`, `instruction`, `model` and `theme` round-trip through the
/// persisted store; `mode`, `output` and `pending` live only as long as the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub url: String,
    pub raw_html: String,
    pub instruction: String,
    pub model: String,
    pub mode: InputMode,
    pub theme: Theme,
    pub output: String,
    pub pending: bool,
}

impl UiState {
    /// Fresh state with nothing restored.
    pub fn defaults(config: &ControllerConfig) -> Self {
        Self {
            url: String::new(),
            raw_html: String::new(),
            instruction: String::new(),
            model: config.default_model.clone(),
            mode: config.default_mode,
            theme: config.default_theme,
            output: String::new(),
            pending: false,
        }
    }

    /// Defaults, overridden by every persisted value that is present and non-empty.
    pub fn load<S: KeyValueStore>(store: &S, config: &ControllerConfig) -> Self {
        let mut state = Self::defaults(config);

        for field in Field::ALL {
            if let Some(value) = stored_value(store, field.storage_key()) {
                // The selector can only show catalog models
                if field == Field::Model && !models::is_known(&value) {
                    warn!("Ignoring unknown persisted model '{}'", value);
                    continue;
                }
                *state.field_mut(field) = value;
            }
        }

        if let Some(value) = stored_value(store, THEME_KEY) {
            match Theme::parse(&value) {
                Some(theme) => state.theme = theme,
                None => warn!("Ignoring unknown persisted theme '{}'", value),
            }
        }

        state
    }

    /// Persist the current value of one field.
    pub fn save_field<S: KeyValueStore>(&self, store: &S, field: Field) -> Result<(), Error> {
        store.set(field.storage_key(), self.field(field))
    }

    pub fn save_theme<S: KeyValueStore>(&self, store: &S) -> Result<(), Error> {
        store.set(THEME_KEY, self.theme.as_str())
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url,
            Field::RawHtml => &self.raw_html,
            Field::Instruction => &self.instruction,
            Field::Model => &self.model,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Url => &mut self.url,
            Field::RawHtml => &mut self.raw_html,
            Field::Instruction => &mut self.instruction,
            Field::Model => &mut self.model,
        }
    }

    /// Switch modes. The field that becomes inactive is cleared.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.field_mut(mode.inactive_field()).clear();
    }

    /// Trimmed value of the field matching the active mode.
    pub fn input_data(&self) -> &str {
        self.field(self.mode.active_field()).trim()
    }
}

fn stored_value<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    store.get(key).filter(|value| !value.is_empty())
}
