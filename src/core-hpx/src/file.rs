//! HTML files handed to the page by drag-and-drop or the file picker.

use async_trait::async_trait;

use crate::Error;

/// The only media type a loaded file may declare.
pub const HTML_MEDIA_TYPE: &str = "text/html";

/// Shown once an accepted file's text has landed in the raw-HTML field.
pub const FILE_LOADED_MESSAGE: &str = "HTML file loaded into raw HTML textarea.";

/// A user-supplied file whose text can be read asynchronously.
#[async_trait(?Send)]
pub trait HtmlFile {
    /// The media type the browser declared for the file (may be empty).
    fn media_type(&self) -> String;

    async fn read_text(&self) -> Result<String, Error>;
}

/// How the file reached the page. Only changes the wording of the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Drop,
    Picker,
}

impl FileSource {
    pub fn rejection_message(&self) -> &'static str {
        match self {
            FileSource::Drop => "Please drop a valid HTML file.",
            FileSource::Picker => "Please select a valid HTML file.",
        }
    }
}

/// Passes the file through if it is present and declared as HTML.
pub fn accept_html_file<F: HtmlFile>(file: Option<&F>) -> Result<&F, Error> {
    match file {
        Some(file) if file.media_type() == HTML_MEDIA_TYPE => Ok(file),
        Some(file) => Err(Error::InvalidFile {
            media_type: Some(file.media_type()),
        }),
        None => Err(Error::InvalidFile { media_type: None }),
    }
}

/// A file that already sits in memory. Stands in for browser files in tests.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    media_type: String,
    contents: Result<String, Error>,
}

impl InMemoryFile {
    pub fn new(media_type: &str, contents: &str) -> Self {
        Self {
            media_type: media_type.to_string(),
            contents: Ok(contents.to_string()),
        }
    }

    pub fn html(contents: &str) -> Self {
        Self::new(HTML_MEDIA_TYPE, contents)
    }

    /// A file whose read fails with `message`.
    pub fn unreadable(media_type: &str, message: &str) -> Self {
        Self {
            media_type: media_type.to_string(),
            contents: Err(Error::FileRead(message.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl HtmlFile for InMemoryFile {
    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    async fn read_text(&self) -> Result<String, Error> {
        self.contents.clone()
    }
}
