use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::ChatTransport;
use super::types::{ChatCompletion, ChatRequest};
use crate::app::ApiConfig;
use crate::utils::GatewayError;

/// reqwest-backed transport for an OpenAI-compatible chat-completions endpoint
pub struct HttpTransport {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.credential().map(str::to_string),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatCompletion, GatewayError> {
        let mut builder = self.client.post(&self.url).json(request);

        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        // No HTTP response at all: let the caller decide what the user sees
        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        // A connection lost while the body streams in is still a network failure
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        let completion: ChatCompletion = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        debug!("Received {} choice(s) from {}", completion.choices.len(), self.url);
        Ok(completion)
    }
}
