use async_trait::async_trait;
use core_hpx::{Error, HtmlFile};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};

use crate::js_error_message;

/// A file from a drop or the file picker.
pub struct WebFile(File);

impl WebFile {
    /// The first file of a list, if there is one.
    pub fn first(files: Option<FileList>) -> Option<Self> {
        files.and_then(|files| files.get(0)).map(WebFile)
    }
}

#[async_trait(?Send)]
impl HtmlFile for WebFile {
    fn media_type(&self) -> String {
        self.0.type_()
    }

    async fn read_text(&self) -> Result<String, Error> {
        let text = JsFuture::from(self.0.text())
            .await
            .map_err(|e| Error::FileRead(js_error_message(&e)))?;
        text.as_string()
            .ok_or_else(|| Error::FileRead(format!("{} did not read as text", self.0.name())))
    }
}
