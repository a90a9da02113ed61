//! Mock processing endpoint for testing
//!
//! Can be configured to answer with a fixed output or to fail the way the real
//! endpoint can (bad status, dropped connection, garbage body), without any
//! network access. Every request it receives is recorded.

use async_trait::async_trait;
use std::cell::RefCell;

use crate::Error;
use crate::process::{ProcessClient, ProcessRequest, ProcessResponse};

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Status(u16),
    Network(String),
    Garbage(String),
}

/// Mock `/process` endpoint.
#[derive(Debug)]
pub struct MockProcessClient {
    reply: Reply,
    requests: RefCell<Vec<ProcessRequest>>,
}

impl MockProcessClient {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answer 2xx with `{"output": output}`.
    pub fn with_output(output: &str) -> Self {
        Self::new(Reply::Output(output.to_string()))
    }

    /// Answer with a non-2xx status.
    pub fn with_status(status: u16) -> Self {
        Self::new(Reply::Status(status))
    }

    /// Fail before any response arrives.
    pub fn with_network_failure(message: &str) -> Self {
        Self::new(Reply::Network(message.to_string()))
    }

    /// Answer 2xx with a body that isn't the expected JSON.
    pub fn with_body(body: &str) -> Self {
        Self::new(Reply::Garbage(body.to_string()))
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl ProcessClient for MockProcessClient {
    async fn process(&self, request: &ProcessRequest) -> Result<ProcessResponse, Error> {
        self.requests.borrow_mut().push(request.clone());

        match &self.reply {
            Reply::Output(output) => Ok(ProcessResponse { output: output.clone() }),
            Reply::Status(status) => Err(Error::ServerStatus(*status)),
            Reply::Network(message) => Err(Error::Network(message.clone())),
            Reply::Garbage(body) => ProcessResponse::from_json(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProcessRequest {
        ProcessRequest {
            input_data: "https://example.com".into(),
            instruction: "Describe".into(),
            model: "mistral".into(),
        }
    }

    #[tokio::test]
    async fn test_mock_with_output() {
        let client = MockProcessClient::with_output("done");
        let response = client.process(&request()).await.unwrap();
        assert_eq!(response.output, "done");
        assert_eq!(client.requests(), vec![request()]);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let err = MockProcessClient::with_status(404).process(&request()).await.unwrap_err();
        assert_eq!(err, Error::ServerStatus(404));

        let err = MockProcessClient::with_network_failure("boom")
            .process(&request())
            .await
            .unwrap_err();
        assert_eq!(err, Error::Network("boom".into()));

        let err = MockProcessClient::with_body("not json").process(&request()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_mock_counts_failed_requests_too() {
        let client = MockProcessClient::with_status(500);
        let _ = client.process(&request()).await;
        let _ = client.process(&request()).await;
        assert_eq!(client.request_count(), 2);
    }
}
