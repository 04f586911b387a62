//! Session broker binary.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 0.0.0.0:8080, pretty logs
//! session-broker
//!
//! # Production: JSON logs on a custom port
//! SESSION_BROKER__SERVER__ENVIRONMENT=production SESSION_BROKER__SERVER__PORT=9000 session-broker
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use session_broker::adapters::RandomCodeSource;
use session_broker::application::SessionRegistry;
use session_broker::config::AppConfig;
use session_broker::server;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet.
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server terminated with an error");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(SessionRegistry::new(
        Arc::new(RandomCodeSource::new()),
        config.broker.registry_settings(),
    ));
    let router = server::build_router(Arc::clone(&registry), &config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        environment = ?config.server.environment,
        "Session broker listening"
    );

    server::serve(listener, router, registry, server::shutdown_signal()).await?;

    tracing::info!("Session broker stopped");
    Ok(())
}
