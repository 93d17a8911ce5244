mod admin;
mod config;
mod persistence;
mod scores;
mod service;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use persistence::sqlite::Database;
use service::AppState;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Game-session scoreboard HTTP server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on (overrides SCOREBOARD_BIND_ADDR and PORT)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// SQLite database file (overrides SCOREBOARD_DATABASE_PATH)
    #[arg(long)]
    database: Option<PathBuf>,
}

/// Stdout logging with span durations, plus a daily-rolling file when
/// `SCOREBOARD_LOG_DIR` is set. The returned guard flushes the file writer.
fn init_tracing() -> Option<WorkerGuard> {
    let (file_layer, guard) = match config::get_log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).ok();
            let appender = tracing_appender::rolling::daily(dir, "scoreboard-server");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing();

    tracing::info!("Starting scoreboard server");

    let db_path = args.database.unwrap_or_else(config::get_database_path);
    tracing::info!("Using database: {}", db_path.display());
    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    let state = AppState::new(&db);
    state
        .admins
        .provision_default(&config::get_admin_username(), &config::get_admin_password())
        .await
        .context("failed to provision default admin")?;

    let addr = args.bind.unwrap_or_else(config::get_bind_addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, service::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
