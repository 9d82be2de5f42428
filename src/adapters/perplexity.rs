use crate::config::UpstreamConfig;
use crate::domain::model::Prompt;
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, SynthesisError};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::json;

const MAX_LOGGED_BODY: usize = 512;

/// Perplexity chat-completions client.
pub struct PerplexityClient {
    config: UpstreamConfig,
    client: Client,
}

impl PerplexityClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SynthesisError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { config, client })
    }

    fn request_body(&self, prompt: &Prompt) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "search_filter": self.config.search_filter,
            "response_format": {
                "type": "json_schema",
                "json_schema": { "schema": prompt.schema }
            }
        })
    }
}

#[async_trait]
impl CompletionClient for PerplexityClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        tracing::debug!("📡 Sending completion request to {}", self.config.endpoint);

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 Upstream response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SynthesisError::AuthError {
                message: format!("upstream answered {}", status),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_LOGGED_BODY).collect();
            tracing::warn!("Upstream request failed with status {}: {}", status, snippet);
            return Err(SynthesisError::UpstreamError {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(response.text().await?)
    }
}
