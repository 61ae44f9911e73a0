//! News API server.
//!
//! Wires the selected store (SQLite file or in-memory) into the router
//! and serves it over HTTP with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

use news_api::{config::ApiConfig, router::Router, server::Server};
use news_store::{MemoryStore, NewsStore, SqliteStore};

/// Command-line arguments for the news server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Path to the SQLite database file
    #[arg(long, default_value = "./news.db")]
    db_path: String,

    /// Use the in-memory store instead of SQLite
    #[arg(long)]
    in_memory: bool,

    /// Request body read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let config = Arc::new(ApiConfig {
        request_timeout_ms: args.request_timeout_ms,
    });

    let store: Arc<dyn NewsStore> = if args.in_memory {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(
            SqliteStore::open(&args.db_path)
                .with_context(|| format!("failed to open database at {}", args.db_path))?,
        )
    };

    let router = Router::new(store, config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid host/port")?;
    let server = Server::new(addr, router);

    tracing::info!(
        %addr,
        in_memory = args.in_memory,
        db_path = %args.db_path,
        "starting news API server"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!(error = %e, "server error");
        }
    });

    signal::ctrl_c()
        .await
        .context("failed to listen for ctrl_c")?;
    tracing::info!("shutting down server");
    server_handle.abort();

    Ok(())
}
