#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, SynthesisError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_secret, validate_url, Validate,
};
use secrecy::{ExposeSecret, SecretString};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_SEARCH_FILTER: &str = "academic";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Settings for the outbound completion endpoint. Read once at startup.
#[derive(Debug)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub api_key: SecretString,
    pub model: String,
    pub search_filter: String,
    pub timeout_seconds: u64,
}

impl UpstreamConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            search_filter: DEFAULT_SEARCH_FILTER.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for UpstreamConfig {
    fn validate(&self) -> Result<()> {
        validate_url("upstream.endpoint", &self.endpoint)?;
        validate_secret("upstream.api_key", self.api_key.expose_secret())?;
        validate_non_empty_string("upstream.model", &self.model)?;
        validate_range(
            "upstream.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| SynthesisError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: self.host.clone(),
                reason: format!("Invalid bind address: {}", e),
            })
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        self.upstream.validate()?;

        tracing::debug!("Service configuration validation passed");
        Ok(())
    }
}
