use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Invalid CAS number format: '{input}'. Expected format: XXXXXXX-XX-X")]
    ValidationError { input: String },

    #[error("Upstream rejected credentials: {message}")]
    AuthError { message: String },

    #[error("Upstream request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Upstream returned status {status}")]
    UpstreamError { status: u16, body: String },

    #[error("Upstream returned unusable data: {message}")]
    ParseError { message: String },

    #[error("No synthesis information found for CAS number {cas_number}")]
    NotFoundError { cas_number: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Upstream,
    Configuration,
    System,
}

impl SynthesisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SynthesisError::ValidationError { .. } | SynthesisError::NotFoundError { .. } => {
                ErrorCategory::Input
            }
            SynthesisError::AuthError { .. }
            | SynthesisError::NetworkError(_)
            | SynthesisError::UpstreamError { .. }
            | SynthesisError::ParseError { .. } => ErrorCategory::Upstream,
            SynthesisError::ConfigError { .. }
            | SynthesisError::InvalidConfigValueError { .. }
            | SynthesisError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SynthesisError::IoError(_) => ErrorCategory::System,
        }
    }

    /// HTTP status code the endpoint layer answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            SynthesisError::ValidationError { .. } => 400,
            SynthesisError::NotFoundError { .. } => 404,
            SynthesisError::NetworkError(_) => 503,
            SynthesisError::UpstreamError { .. } | SynthesisError::ParseError { .. } => 502,
            _ => 500,
        }
    }

    /// Message safe to return to an HTTP client.
    pub fn client_message(&self) -> String {
        match self {
            SynthesisError::ValidationError { .. } | SynthesisError::NotFoundError { .. } => {
                self.to_string()
            }
            SynthesisError::NetworkError(_) => "Synthesis service is temporarily unavailable".to_string(),
            SynthesisError::UpstreamError { status, .. } => {
                format!("Synthesis service returned an error (status {})", status)
            }
            SynthesisError::ParseError { .. } => "Upstream returned unusable data".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SynthesisError::ValidationError { .. } => {
                "Use a CAS number such as 64-17-5 (2-7 digits, 2 digits, 1 check digit)"
            }
            SynthesisError::AuthError { .. } | SynthesisError::MissingConfigError { .. } => {
                "Set PERPLEXITY_API_KEY or provide upstream.api_key in the config file"
            }
            SynthesisError::NetworkError(_) => {
                "Check network connectivity to the upstream endpoint or raise the timeout"
            }
            SynthesisError::UpstreamError { .. } | SynthesisError::ParseError { .. } => {
                "Retry later; the upstream service answered unexpectedly"
            }
            SynthesisError::NotFoundError { .. } => "Try a different CAS number",
            SynthesisError::ConfigError { .. } | SynthesisError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            SynthesisError::IoError(_) => "Check file permissions and disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthesisError>;
