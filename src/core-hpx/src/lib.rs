pub mod config;
pub mod controller;
pub mod errors;
pub mod file;
pub mod logging;
pub mod models;
pub mod process;
pub mod state;
pub mod store;
pub mod view;

pub use config::ControllerConfig;
pub use controller::{Controller, load_html_file, run_submission};
pub use errors::{Error, FAILURE_MARKER};
pub use file::{FileSource, HtmlFile, InMemoryFile};
pub use logging::setup_logging;
pub use process::{ProcessClient, ProcessRequest, ProcessResponse};
pub use state::{Field, InputMode, Theme, UiState};
pub use store::{KeyValueStore, MemoryStore};
pub use view::View;
