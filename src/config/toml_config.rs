use crate::config::{
    ServiceConfig, UpstreamConfig, DEFAULT_API_ENDPOINT, DEFAULT_HOST, DEFAULT_MODEL,
    DEFAULT_PORT, DEFAULT_SEARCH_FILTER, DEFAULT_TIMEOUT_SECONDS,
};
use crate::utils::error::{Result, SynthesisError};
use crate::utils::validation::validate_required_field;
use regex::Regex;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex"));

/// On-disk configuration, e.g.
///
/// ```toml
/// [server]
/// port = 8080
///
/// [upstream]
/// api_key = "${PERPLEXITY_API_KEY}"
/// timeout_seconds = 45
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub upstream: UpstreamSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub search_filter: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SynthesisError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SynthesisError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PERPLEXITY_API_KEY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Resolves the file into a service configuration. The API key is required.
    pub fn into_service_config(self) -> Result<ServiceConfig> {
        let api_key = validate_required_field("upstream.api_key", &self.upstream.api_key)?;

        Ok(ServiceConfig {
            host: self.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.server.port.unwrap_or(DEFAULT_PORT),
            upstream: UpstreamConfig {
                endpoint: self
                    .upstream
                    .endpoint
                    .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
                api_key: SecretString::from(api_key.clone()),
                model: self.upstream.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                search_filter: self
                    .upstream
                    .search_filter
                    .unwrap_or_else(|| DEFAULT_SEARCH_FILTER.to_string()),
                timeout_seconds: self
                    .upstream
                    .timeout_seconds
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            },
        })
    }
}
