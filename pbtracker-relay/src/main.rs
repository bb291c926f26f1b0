use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pbtracker_relay::anthropic::AnthropicClient;
use pbtracker_relay::config;
use pbtracker_relay::routes::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "pbtracker-relay", version, about = "Chat relay for the PBTracker budget app")]
struct Cli {
    /// TOML config file (defaults to ./relay.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT and the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    // Fail fast: a relay without credentials could only ever answer 500.
    let api_key = config::api_key_from_env()?;

    let port = cli
        .port
        .or_else(config::port_from_env)
        .unwrap_or(cfg.server.port);

    let provider = AnthropicClient::new(cfg.claude.clone(), api_key).context("build provider client")?;
    let state = AppState {
        provider: Arc::new(provider),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, model = %cfg.claude.model, "relay listening");

    axum::serve(listener, router(state)).await.context("serve")?;
    Ok(())
}
