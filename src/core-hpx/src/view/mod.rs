pub mod recording;

use crate::state::{Field, InputMode, Theme};

/// The page as the controller sees it.
///
/// Every method is fire-and-forget: a host that fails to touch the DOM logs the
/// failure and moves on, the controller's state stays authoritative.
pub trait View {
    /// Assign a form field's visible value. Does not fire any input event.
    fn set_field_value(&self, field: Field, value: &str);

    /// Show and enable the active mode's field, hide and disable the other one,
    /// check the matching radio and mark its option label active.
    fn show_mode(&self, mode: InputMode);

    fn set_model_description(&self, text: &str);

    fn set_output(&self, text: &str);

    /// Resize the output display to exactly fit its content.
    fn autosize_output(&self);

    fn set_submit_control(&self, enabled: bool, label: &str);

    /// Set the document-level theme attribute and the toggle's checked state.
    fn apply_theme(&self, theme: Theme);

    /// Blocking, user-visible notification.
    fn notify(&self, message: &str);

    /// Put `text` on the system clipboard, notifying the user once done.
    fn copy_to_clipboard(&self, text: &str);

    /// Offer `contents` as a plain-text download named `file_name`.
    fn offer_download(&self, file_name: &str, contents: &str);
}
