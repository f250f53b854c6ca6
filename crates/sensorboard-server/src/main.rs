//! Sensorboard admin dashboard server
//!
//! Serves the browser dashboard for the IoT sensor backend:
//! - Live temperature and humidity charts
//! - Paginated, filterable sensor, income, expense and report tables
//! - Spreadsheet export of every table
//! - Create, edit and delete forms for income and expense entries
//!
//! Usage:
//! ```bash
//! # With config file
//! sensorboard-server --config config.yaml
//!
//! # Or with environment variables
//! SENSORBOARD_API_URL=http://api.local:8000 \
//! SENSORBOARD_API_USERNAME=iot SENSORBOARD_API_PASSWORD=secret \
//!   sensorboard-server
//!
//! # With both (env vars override config, flags override both)
//! SENSORBOARD_API_PASSWORD=secret sensorboard-server --config config.yaml --port 9000
//! ```

mod config;

use clap::Parser;
use config::ServerConfig;
use sensorboard_egress::RemoteClient;
use sensorboard_ui::UiServer;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Sensorboard - IoT sensor admin dashboard
#[derive(Parser)]
#[command(name = "sensorboard-server")]
#[command(about = "Admin dashboard for IoT sensor and finance records", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "SENSORBOARD_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Base URL of the backend API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config.as_deref() {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    // Merge environment variables (they override config file)
    config.merge_env();

    // CLI flags have the highest precedence
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(api_url) = cli.api_url {
        config.remote.base_url = api_url;
    }

    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!("{}", log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Initializing Sensorboard");
    match cli.config.as_deref() {
        Some(path) => info!("📁 Loaded configuration from: {}", path),
        None => info!("📁 Using default configuration"),
    }
    info!("🔌 Backend API: {}", config.remote.base_url);
    if config.remote.username.is_empty() {
        info!("⚠️  No API username configured, requests are sent without credentials");
    }
    debug!(
        refresh_interval = config.ui.refresh_interval,
        export_enabled = config.ui.export_enabled,
        session_ttl_secs = config.ui.session_ttl_secs,
        "Dashboard settings"
    );

    let client = RemoteClient::new(config.remote.clone())?;
    let server = UiServer::new(config.ui_config(), client);

    server.serve(shutdown_signal()).await?;

    info!("👋 Sensorboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
