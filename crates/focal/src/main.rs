//! `focal` — personal productivity dashboard server.

#![deny(unsafe_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use focal_auth::{GoogleOAuthConfig, LoginGate};
use focal_llm::{LlmConfig, select_provider};
use focal_server::{AppState, build_router};
use focal_settings::Config;
use focal_store::Store;

#[derive(Debug, Parser)]
#[command(name = "focal", about = "Personal productivity dashboard")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8787)]
        port: u16,

        /// Database file path; overrides the environment-derived default.
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Root directory for file search; overrides the default.
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    focal_core::logging::init_tracing();

    let args = Args::parse();
    match args.command {
        Command::Serve {
            port,
            db_path,
            root,
        } => serve(port, db_path, root).await,
    }
}

async fn serve(port: u16, db_path: Option<PathBuf>, root: Option<PathBuf>) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(root) = root {
        config = config.with_root(&root);
    }
    if let Some(db_path) = db_path {
        config = config.with_db_path(&db_path);
    }

    let store = Store::open(&config.db_path)
        .with_context(|| format!("opening database at {}", config.db_path.display()))?;
    tracing::info!(path = %config.db_path.display(), "database ready");

    let gate = GoogleOAuthConfig::from_env().map(LoginGate::new);
    if gate.is_some() {
        tracing::info!("Google OAuth login gate enabled");
    } else {
        tracing::warn!("Google OAuth not configured; running without a login gate");
    }

    let provider = select_provider(&LlmConfig::from_env());
    tracing::info!(provider = %provider.name(), "chat provider selected");

    let state = AppState::new(store, config, gate, provider);
    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "focal server ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
