//! Mailgate server - email allowance gatekeeper service
//!
//! Answers whether an email address may register or log in, based on a
//! bearer token and configured allow-lists.

use clap::Parser;
use mailgate::infra::ServerConfig;
use mailgate::io::start_gatekeeper_server;
use mailgate::services::AllowanceService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Mailgate - email allowance gatekeeper service
#[derive(Parser, Debug)]
#[command(name = "mailgate-server", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on
    #[arg(short, long, default_value_t = 2025)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-decision visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("mailgate-server starting");

    let args = Args::parse();

    let config_path = ServerConfig::resolve_config_path(args.config.as_deref());
    let config = ServerConfig::from_file(&config_path)?;

    info!(
        config_file = %config.config_file(),
        allowed_mails = config.allowed_mails().len(),
        allowed_domains = config.allowed_domains().len(),
        port = %args.port,
        "config_loaded"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Handle shutdown on Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    let allowance = Arc::new(AllowanceService::new(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;

    start_gatekeeper_server(listener, allowance, shutdown_rx).await?;

    info!("mailgate-server shutdown complete");
    Ok(())
}
