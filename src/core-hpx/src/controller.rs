use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::file::{FILE_LOADED_MESSAGE, FileSource, HtmlFile, accept_html_file};
use crate::models;
use crate::process::{ProcessClient, ProcessRequest, ProcessResponse};
use crate::state::{Field, InputMode, Theme, UiState};
use crate::store::KeyValueStore;
use crate::view::View;
use crate::Error;

/// Turns page events into state changes, store writes and view updates.
///
/// Handlers are plain synchronous methods. The two operations that suspend
/// (submitting and reading a file) are split into a begin/finish pair so that a
/// host holding the controller in a `RefCell` never keeps it borrowed across an
/// await; see [`run_submission`] and [`load_html_file`].
pub struct Controller<S, V> {
    store: S,
    view: V,
    config: ControllerConfig,
    state: UiState,
}

impl<S: KeyValueStore, V: View> Controller<S, V> {
    pub fn new(store: S, view: V, config: ControllerConfig) -> Self {
        let state = UiState::defaults(&config);
        Self {
            store,
            view,
            config,
            state,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Restore persisted values and bring the whole page in line with them.
    pub fn startup(&mut self) {
        self.state = UiState::load(&self.store, &self.config);
        debug!(
            "Restored state: model={}, theme={}",
            self.state.model,
            self.state.theme.as_str()
        );

        for field in Field::ALL {
            self.view.set_field_value(field, self.state.field(field));
        }
        self.view.apply_theme(self.state.theme);
        self.apply_mode(self.state.mode);
        self.render_model_description();
        self.view
            .set_submit_control(!self.state.pending, &self.config.ready_label);
        self.view.autosize_output();
    }

    /// The user edited a persisted field.
    pub fn on_field_input(&mut self, field: Field, value: &str) {
        *self.state.field_mut(field) = value.to_string();
        self.persist(field);

        if field == Field::Model {
            self.render_model_description();
        }
    }

    pub fn on_mode_selected(&mut self, mode: InputMode) {
        debug!("Input mode selected: {}", mode.radio_value());
        self.apply_mode(mode);
    }

    /// The user typed into the output display.
    pub fn on_output_edited(&mut self, text: &str) {
        self.state.output = text.to_string();
        self.view.autosize_output();
    }

    /// Replace the output display's content. Always re-fits its height.
    pub fn set_output(&mut self, text: &str) {
        self.state.output = text.to_string();
        self.view.set_output(text);
        self.view.autosize_output();
    }

    /// Overwrite the instruction with a preset and persist it.
    pub fn set_instruction(&mut self, text: &str) {
        self.view.set_field_value(Field::Instruction, text);
        self.on_field_input(Field::Instruction, text);
    }

    pub fn toggle_theme(&mut self, dark: bool) {
        self.state.theme = Theme::from_toggle(dark);
        self.view.apply_theme(self.state.theme);
        if let Err(e) = self.state.save_theme(&self.store) {
            warn!("Failed to persist theme: {}", e);
        }
    }

    pub fn copy_output(&self) {
        self.view.copy_to_clipboard(&self.state.output);
    }

    pub fn download_output(&self) {
        self.view
            .offer_download(&self.config.download_file_name, &self.state.output);
    }

    /// Lock the submit control, clear the output and build the request.
    ///
    /// Refuses while another submission is pending, whatever triggered it.
    pub fn begin_submission(&mut self) -> Result<ProcessRequest, Error> {
        if self.state.pending {
            warn!("Ignoring submission: one is already in flight");
            return Err(Error::AlreadyPending);
        }

        self.state.pending = true;
        self.view.set_submit_control(false, &self.config.busy_label);
        self.set_output("");

        let request = ProcessRequest {
            input_data: self.state.input_data().to_string(),
            instruction: self.state.instruction.clone(),
            model: self.state.model.clone(),
        };
        info!(
            "Submitting {} input to {} with model {}",
            self.state.mode.radio_value(),
            self.config.endpoint,
            request.model
        );
        Ok(request)
    }

    /// Render the outcome and hand the submit control back to the user.
    pub fn finish_submission(&mut self, result: Result<ProcessResponse, Error>) {
        match result {
            Ok(response) => {
                info!("Submission succeeded ({} bytes of output)", response.output.len());
                self.set_output(&response.output);
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.set_output(&e.output_message());
            }
        }

        self.state.pending = false;
        self.view.set_submit_control(true, &self.config.ready_label);
        self.view.autosize_output();
    }

    /// Put a loaded file's text into the raw-HTML field, or report why it couldn't be.
    ///
    /// On failure the form is left untouched and the error is returned after the
    /// user has been notified.
    pub fn finish_file_load(&mut self, result: Result<String, Error>, source: FileSource) -> Result<(), Error> {
        match result {
            Ok(text) => {
                self.state.raw_html = text;
                self.view.set_field_value(Field::RawHtml, &self.state.raw_html);
                self.persist(Field::RawHtml);
                self.apply_mode(InputMode::RawHtml);
                self.view.notify(FILE_LOADED_MESSAGE);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected file: {}", e);
                self.view.notify(source.rejection_message());
                Err(e)
            }
        }
    }

    fn apply_mode(&mut self, mode: InputMode) {
        self.state.set_mode(mode);
        self.view.set_field_value(mode.inactive_field(), "");
        self.view.show_mode(mode);
    }

    fn render_model_description(&self) {
        self.view
            .set_model_description(models::describe(&self.state.model));
    }

    fn persist(&self, field: Field) {
        if let Err(e) = self.state.save_field(&self.store, field) {
            warn!("Failed to persist {}: {}", field.storage_key(), e);
        }
    }
}

/// Run one full submission against `client`.
///
/// Returns [`Error::AlreadyPending`] without contacting the endpoint if a
/// submission is already in flight. Endpoint failures are not returned: they end
/// up in the output display.
pub async fn run_submission<S, V, C>(controller: &RefCell<Controller<S, V>>, client: &C) -> Result<(), Error>
where
    S: KeyValueStore,
    V: View,
    C: ProcessClient + ?Sized,
{
    let request = controller.borrow_mut().begin_submission()?;
    let result = client.process(&request).await;
    controller.borrow_mut().finish_submission(result);
    Ok(())
}

/// Load a dropped or picked file into the raw-HTML field.
pub async fn load_html_file<S, V, F>(
    controller: &RefCell<Controller<S, V>>,
    file: Option<F>,
    source: FileSource,
) -> Result<(), Error>
where
    S: KeyValueStore,
    V: View,
    F: HtmlFile,
{
    let result = match accept_html_file(file.as_ref()) {
        Ok(file) => file.read_text().await,
        Err(e) => Err(e),
    };
    controller.borrow_mut().finish_file_load(result, source)
}
