use async_trait::async_trait;
use core_hpx::{Error, ProcessClient, ProcessRequest, ProcessResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::js_error_message;

/// Talks to the processing endpoint through `window.fetch`.
pub struct FetchProcessClient {
    endpoint: String,
}

impl FetchProcessClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl ProcessClient for FetchProcessClient {
    async fn process(&self, request: &ProcessRequest) -> Result<ProcessResponse, Error> {
        let window = web_sys::window().ok_or_else(|| Error::Network("no global window exists".to_string()))?;

        let body_str = request.to_json()?;

        let opts = &mut RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body_str));

        let request = Request::new_with_str_and_init(&self.endpoint, opts).map_err(network_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network_error)?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?;
        let resp: Response = resp_value.dyn_into().map_err(network_error)?;

        if !resp.ok() {
            return Err(Error::ServerStatus(resp.status()));
        }

        let json = JsFuture::from(resp.json().map_err(invalid_response)?)
            .await
            .map_err(invalid_response)?;
        let data: ProcessResponse =
            serde_wasm_bindgen::from_value(json).map_err(|e| Error::InvalidResponse(e.to_string()))?;

        Ok(data)
    }
}

fn network_error(value: JsValue) -> Error {
    Error::Network(js_error_message(&value))
}

fn invalid_response(value: JsValue) -> Error {
    Error::InvalidResponse(js_error_message(&value))
}
