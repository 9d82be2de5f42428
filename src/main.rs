use cas_synthesis::utils::{logger, validation::Validate};
use cas_synthesis::{build_router, AppState, CliConfig, PerplexityClient, SynthesisService};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_server_logger(cli.verbose);
    }

    tracing::info!("Starting cas-synthesis {}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 配置缺失（例如 API key）視為致命錯誤，不啟動服務
    let config = match cli.into_service_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr()?;
    let client = PerplexityClient::new(config.upstream)?;
    let state = AppState::new(SynthesisService::new(Arc::new(client)));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("  GET /                       - API information");
    tracing::info!("  GET /health                 - Liveness probe");
    tracing::info!("  GET /synthesis/<cas_number> - Synthesis lookup");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
