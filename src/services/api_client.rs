use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::TestCase;
use crate::session::SessionCredential;

/// The liveness probe answers fast or not at all
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Response body as captured: decoded JSON when parseable, raw text otherwise
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub payload: Payload,
}

impl ApiResponse {
    pub fn json(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

/// Thin blocking-in-order HTTP client over the configured base address
pub struct ApiClient {
    client: Client,
    base_url: String,
    ping_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url(),
            ping_url: config.ping_url(),
        })
    }

    /// Prefix relative paths with the API base; absolute URLs pass through
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Issue one scripted call; transport errors bubble to the caller
    pub async fn execute(&self, case: &TestCase) -> Result<ApiResponse, reqwest::Error> {
        let url = self.resolve_url(&case.path);
        let mut request = self.client.request(case.method.clone(), &url);

        if let Some(credential) = &case.credential {
            if !credential.is_empty() {
                request = request.header(COOKIE, credential.header_value());
            }
        }
        if let Some(body) = &case.body {
            request = request.json(body);
        }

        Self::read(request.send().await?).await
    }

    /// Liveness probe against `<server>/ping`
    pub async fn ping(&self) -> Result<ApiResponse, reqwest::Error> {
        let response = self
            .client
            .get(&self.ping_url)
            .timeout(PING_TIMEOUT)
            .send()
            .await?;
        Self::read(response).await
    }

    /// POST to an identity-establishing endpoint, capturing the session
    /// cookie the server issues alongside the payload
    pub async fn authenticate(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(ApiResponse, SessionCredential), reqwest::Error> {
        let url = self.resolve_url(path);
        let response = self.client.post(&url).json(body).send().await?;
        let credential = SessionCredential::from_headers(response.headers());
        Ok((Self::read(response).await?, credential))
    }

    async fn read(response: reqwest::Response) -> Result<ApiResponse, reqwest::Error> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        // Non-JSON bodies are kept as raw text, not treated as failures
        let payload = match serde_json::from_str::<Value>(&text) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(text),
        };
        Ok(ApiResponse { status, payload })
    }
}
