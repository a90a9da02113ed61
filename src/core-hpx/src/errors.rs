/// Everything that can go wrong while handling a user interaction.
///
/// None of these are fatal: each is recovered inside the handler that raised it,
/// either by rendering it into the output display or by notifying the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The request never got a response (fetch rejected, connection dropped, ...).
    #[error("{0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Server error: {0}")]
    ServerStatus(u16),

    /// The endpoint answered 2xx but the body wasn't `{"output": string}`.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A dropped or selected file was missing or wasn't declared as HTML.
    #[error("Not an HTML file: {}", .media_type.as_deref().unwrap_or("no file"))]
    InvalidFile { media_type: Option<String> },

    /// The file was accepted but its text couldn't be read.
    #[error("Failed to read file: {0}")]
    FileRead(String),

    /// Writing to the persisted store failed (quota, private mode, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A submission was requested while another one is still in flight.
    #[error("A submission is already in progress")]
    AlreadyPending,
}

/// Prefix written in front of any failure shown in the output display.
pub const FAILURE_MARKER: &str = "❌ Error:";

impl Error {
    /// The text written into the output display when a submission fails.
    pub fn output_message(&self) -> String {
        format!("{} {}", FAILURE_MARKER, self)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_status_message_carries_code() {
        assert_eq!(Error::ServerStatus(500).to_string(), "Server error: 500");
        assert_eq!(Error::ServerStatus(502).output_message(), "❌ Error: Server error: 502");
    }

    #[test]
    fn network_message_is_verbatim() {
        assert_eq!(Error::Network("boom".into()).output_message(), "❌ Error: boom");
    }

    #[test]
    fn invalid_file_without_file() {
        let err = Error::InvalidFile { media_type: None };
        assert_eq!(err.to_string(), "Not an HTML file: no file");

        let err = Error::InvalidFile {
            media_type: Some("text/plain".into()),
        };
        assert!(err.to_string().contains("text/plain"));
    }
}
