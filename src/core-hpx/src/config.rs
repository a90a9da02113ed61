use crate::models::DEFAULT_MODEL;
use crate::state::{InputMode, Theme};

/// Path of the processing endpoint when the page doesn't override it.
pub const DEFAULT_ENDPOINT: &str = "/process";

/// Knobs for the controller. Everything has a compiled-in default; the browser
/// host only overrides the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Where submissions are POSTed.
    pub endpoint: String,
    /// Model selected when none was persisted.
    pub default_model: String,
    /// Theme applied when none was persisted.
    pub default_theme: Theme,
    /// Input mode active at page load. The mode itself is never persisted.
    pub default_mode: InputMode,
    /// Submit control label while idle.
    pub ready_label: String,
    /// Submit control label while a request is in flight.
    pub busy_label: String,
    /// File name offered when downloading the output.
    pub download_file_name: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_theme: Theme::Light,
            default_mode: InputMode::Url,
            ready_label: "Submit".to_string(),
            busy_label: "⏳ Thinking...".to_string(),
            download_file_name: "output.txt".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Same config, POSTing to `endpoint` instead. Blank values keep the current endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            self.endpoint = endpoint.to_string();
        }
        self
    }
}
