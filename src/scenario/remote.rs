use super::source::ScenarioSource;
use super::types::{Scenario, ScenarioRequest};
use crate::config::BackendConfig;
use crate::error::{ClientResult, ScenarioError};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Generation service reached over HTTP.
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
    error_field: String,
}

impl RemoteSource {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = config
            .base_url()
            .ok_or_else(|| Error::config("Remote source requires backend.base_url"))?
            .to_string();

        if config.error_field.trim().is_empty() {
            return Err(Error::config("backend.error_field must not be blank"));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("whatif-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!("Creating remote scenario source for: {}", base_url);

        Ok(Self {
            client,
            base_url,
            error_field: config.error_field.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Sends the request and reads the whole body. Only failures that leave
    /// us without a response are reported as network errors.
    async fn exchange(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<(StatusCode, Vec<u8>)> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to generation service failed: {}", e);
            if e.is_builder() {
                ScenarioError::unknown()
            } else {
                ScenarioError::network()
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read response body ({}): {}", status, e);
            ScenarioError::unknown()
        })?;

        debug!("Generation service answered {} ({} bytes)", status, body.len());
        Ok((status, body.to_vec()))
    }

    fn decode<T: DeserializeOwned>(&self, status: StatusCode, body: &[u8]) -> ClientResult<T> {
        if !status.is_success() {
            return Err(match self.service_message(body) {
                Some(message) => ScenarioError::service(message),
                None => {
                    warn!("Generation service returned {} without a description", status);
                    ScenarioError::unknown()
                }
            });
        }

        serde_json::from_slice(body).map_err(|e| {
            warn!("Malformed response from generation service: {}", e);
            ScenarioError::unknown()
        })
    }

    /// The description carried in an error body, if it has one.
    fn service_message(&self, body: &[u8]) -> Option<String> {
        let value: Value = serde_json::from_slice(body).ok()?;
        value
            .get(&self.error_field)
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl ScenarioSource for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn generate(&self, request: ScenarioRequest) -> ClientResult<Scenario> {
        debug!("Requesting scenario for session: {}", request.session_id);

        let (status, body) = self
            .exchange(self.client.post(self.api_url("/scenarios/generate")).json(&request))
            .await?;
        self.decode(status, &body)
    }

    async fn history(&self, session_id: &str, limit: u32) -> ClientResult<Vec<Scenario>> {
        debug!("Fetching up to {} scenarios for session: {}", limit, session_id);

        let request = self
            .client
            .get(self.api_url("/scenarios/history"))
            .query(&[("session_id", session_id.to_string()), ("limit", limit.to_string())]);

        let result = match self.exchange(request).await {
            Ok((status, body)) => self.decode::<Vec<Scenario>>(status, &body),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            debug!("History lookup failed as {:?}", e.kind);
            ScenarioError::history()
        })
    }

    async fn health(&self) -> ClientResult<String> {
        let (status, body) = self.exchange(self.client.get(self.api_url("/"))).await?;
        let value: Value = self.decode(status, &body)?;

        Ok(value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("ok")
            .to_string())
    }
}
