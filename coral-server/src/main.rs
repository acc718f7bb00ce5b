//! # Coral Server
//!
//! Main entry point for the Coral Markets notification relay.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (open auth, recording gateway)
//! coral-server
//!
//! # Run with environment variable overrides
//! CORAL_PORT=8090 CORAL_API_KEY=secret coral-server
//! ```
//!
//! Configuration comes from command-line flags and `CORAL_*` environment
//! variables; a `.env` file in the working directory is loaded first if
//! present.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use coral_api::{ApiConfig, ApiServer, AuthConfig};
use coral_engine::{ChatGateway, HttpGateway, MemoryStore, RecordingGateway};

/// Coral Markets notification relay
#[derive(Parser, Debug)]
#[command(name = "coral-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server host
    #[arg(long, env = "CORAL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(long, env = "CORAL_PORT", default_value_t = 3000)]
    port: u16,

    /// Shared API key checked against the X-API-Key header
    #[arg(long, env = "CORAL_API_KEY")]
    api_key: Option<String>,

    /// Shared token checked against Authorization: Bearer
    #[arg(long, env = "CORAL_TOKEN")]
    token: Option<String>,

    /// Chat platform REST API base URL
    #[arg(long, env = "CORAL_CHAT_API_URL")]
    chat_api_url: Option<String>,

    /// Chat platform bot token
    #[arg(long, env = "CORAL_CHAT_BOT_TOKEN")]
    chat_bot_token: Option<String>,

    /// Chat delivery timeout in seconds
    #[arg(long, env = "CORAL_CHAT_TIMEOUT_SECS", default_value_t = 10)]
    chat_timeout_secs: u64,

    /// Default log filter (RUST_LOG takes precedence)
    #[arg(long, env = "CORAL_LOG", default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log);

    info!("Starting Coral Markets notification relay");

    match run(args).await {
        Ok(()) => info!("Coral relay stopped"),
        Err(e) => {
            error!("Server error: {e}");
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber with an env-filter.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Picks the delivery gateway: HTTP when chat credentials are configured,
/// otherwise the recording gateway (deliveries are then only logged).
fn build_gateway(args: &Args) -> Arc<dyn ChatGateway> {
    match (&args.chat_api_url, &args.chat_bot_token) {
        (Some(url), Some(token)) => {
            info!(base_url = %url, "Using HTTP chat gateway");
            Arc::new(HttpGateway::new(
                url.clone(),
                token.clone(),
                Duration::from_secs(args.chat_timeout_secs),
            ))
        }
        _ => {
            warn!("Chat credentials not configured; deliveries will only be recorded");
            Arc::new(RecordingGateway::new())
        }
    }
}

/// Wires components together and runs the server until ctrl-c.
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = build_gateway(&args);
    let store = Arc::new(MemoryStore::new());

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        auth: AuthConfig {
            api_key: args.api_key,
            token: args.token,
        },
    };

    let server = ApiServer::new(config, store, gateway);
    server.run_with_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Completes when the process receives ctrl-c.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
}
