use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_models::error::ServiceError;

/// Thin JSON-over-HTTP client shared by every service wrapper. One call to
/// [`ApiClient::request`] is exactly one HTTP request.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    pub async fn request<T>(&self, method: Method, url: &str, body: Option<Value>)
                            -> Result<T, ServiceError>
    where T: DeserializeOwned {
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, url)
            .headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response.bytes().await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&bytes);
            error!("API error ({}): {}", status, status.canonical_reason().unwrap_or(""));

            return Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            error!("Error parsing JSON from {}: {}", url, e);
            ServiceError::Decode(e.to_string())
        })
    }
}

/// Pull `message` (or `error`) out of an error body; anything else yields an
/// empty message.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value.get("message")
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default()
}
