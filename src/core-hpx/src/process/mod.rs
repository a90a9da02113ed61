pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Body of `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub input_data: String,
    pub instruction: String,
    pub model: String,
}

impl ProcessRequest {
    /// JSON body sent with `Content-Type: application/json`.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Body of a 2xx answer from `/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub output: String,
}

impl ProcessResponse {
    pub fn from_json(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Interface to the remote processing endpoint.
///
/// Implementations map transport failures to [`Error::Network`], non-2xx statuses
/// to [`Error::ServerStatus`] and unparseable bodies to [`Error::InvalidResponse`].
/// No retries, no timeout: the call resolves whenever the transport does.
#[async_trait(?Send)]
pub trait ProcessClient {
    async fn process(&self, request: &ProcessRequest) -> Result<ProcessResponse, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_wire_field_names() {
        let request = ProcessRequest {
            input_data: "https://example.com".into(),
            instruction: "Summarize".into(),
            model: "mistral".into(),
        };
        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(json["input_data"], "https://example.com");
        assert_eq!(json["instruction"], "Summarize");
        assert_eq!(json["model"], "mistral");
    }

    #[test]
    fn test_response_requires_output() {
        assert_eq!(
            ProcessResponse::from_json(r#"{"output": "X"}"#).unwrap().output,
            "X"
        );

        let err = ProcessResponse::from_json(r#"{"result": "X"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));

        let err = ProcessResponse::from_json("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }
}
