use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nt_core::ArticleStorage;
use nt_storage::StorageKind;
use nt_web::{AppState, WebConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod logging;

use logging::{init_logging, LogFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "News article HTTP service", long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct StorageArgs {
    /// Storage backend: memory or sqlite
    #[arg(long, default_value = "memory")]
    storage: StorageKind,
    /// Backend connection URL (e.g. sqlite://news.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the news API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Largest accepted request body, in bytes
        #[arg(long, default_value_t = nt_web::state::DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,
        #[command(flatten)]
        storage: StorageArgs,
    },
    /// Connect to the storage backend and report whether it answers
    Check {
        #[command(flatten)]
        storage: StorageArgs,
    },
}

async fn open_storage(args: &StorageArgs) -> anyhow::Result<Arc<dyn ArticleStorage>> {
    info!("💾 Checking storage connection...");
    let storage = nt_storage::create_storage(args.storage, args.database_url.as_deref())
        .await
        .with_context(|| format!("failed to open {} storage", args.storage))?;
    let count = nt_storage::check_storage(&storage).await?;
    info!("✨ Storage initialized successfully (using {}, {} articles)", args.storage, count);
    Ok(storage)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = nt_web::create_app(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 Server starting on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.log_json { LogFormat::Json } else { LogFormat::Pretty });

    match cli.command {
        Commands::Serve { host, port, max_body_bytes, storage } => {
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("invalid listen address {}:{}", host, port))?;
            let storage = open_storage(&storage).await?;
            let state = AppState::new(storage).with_config(WebConfig { max_body_bytes });
            serve(addr, state).await?;
        }
        Commands::Check { storage } => {
            open_storage(&storage).await?;
        }
    }

    Ok(())
}
