use crate::config::toml_config::TomlConfig;
use crate::config::{
    ServiceConfig, UpstreamConfig, DEFAULT_API_ENDPOINT, DEFAULT_MODEL, DEFAULT_SEARCH_FILTER,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(name = "cas-synthesis")]
#[command(about = "HTTP service returning synthesis routes for a CAS registry number")]
#[command(version)]
pub struct CliConfig {
    #[arg(long, env = "SYNTHESIS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "SYNTHESIS_PORT", default_value = "5000")]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = DEFAULT_SEARCH_FILTER)]
    pub search_filter: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "TOML config file; replaces the server and upstream flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_endpoint", &self.api_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("search_filter", &self.search_filter)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl CliConfig {
    pub fn into_service_config(self) -> Result<ServiceConfig> {
        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from {}", path.display());
            return TomlConfig::from_file(path)?.into_service_config();
        }

        let api_key = validate_required_field("PERPLEXITY_API_KEY", &self.api_key)?;

        Ok(ServiceConfig {
            host: self.host,
            port: self.port,
            upstream: UpstreamConfig {
                endpoint: self.api_endpoint,
                api_key: SecretString::from(api_key.clone()),
                model: self.model,
                search_filter: self.search_filter,
                timeout_seconds: self.timeout_seconds,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_flags_resolve_to_service_config() {
        let cli = CliConfig::parse_from([
            "cas-synthesis",
            "--port",
            "8080",
            "--api-key",
            "pplx-flag",
            "--timeout-seconds",
            "10",
        ]);
        let config = cli.into_service_config().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.timeout_seconds, 10);
        assert_eq!(config.upstream.api_key.expose_secret(), "pplx-flag");
        assert_eq!(config.upstream.model, "sonar");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let cli = CliConfig::parse_from(["cas-synthesis", "--api-key", "pplx-hidden"]);
        assert!(!format!("{:?}", cli).contains("pplx-hidden"));
    }
}
