pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::PerplexityClient;
pub use app::{build_router, AppState};
pub use config::{toml_config::TomlConfig, ServiceConfig, UpstreamConfig};
pub use core::service::SynthesisService;
pub use domain::{cas::CasNumber, ports::CompletionClient};
pub use utils::error::{Result, SynthesisError};
