//! ExploreNow Server
//!
//! `serve` (default) runs the HTTP API; `seed` writes the sample catalog into
//! the configured PostgreSQL database.

use anyhow::{Context, Result};
use clap::Parser;
use explorenow_server::config::{Cli, Command};
use explorenow_server::storage::cache::SWEEP_INTERVAL;
use explorenow_server::storage::{select_backend, Fixtures, PgStore, PoolSettings};
use explorenow_server::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.subcommand() {
        Command::Serve => run_server(&cli).await,
        Command::Seed => run_seed(&cli).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(cli: &Cli) -> Result<()> {
    info!("Starting ExploreNow server v{}", env!("CARGO_PKG_VERSION"));

    let backend = select_backend(cli.database_url.as_deref(), &PoolSettings::default())
        .await
        .context("Failed to initialize storage")?;
    let kind = backend.kind();

    let state = AppState::new(Arc::new(backend), kind)
        .with_cache_ttl(cli.cache_ttl())
        .with_slow_threshold(cli.slow_threshold());
    let sweeper = state.cache.spawn_sweeper(SWEEP_INTERVAL);

    if let Some(dir) = &cli.static_dir {
        info!("Serving static files from {}", dir.display());
    }
    let app = build_router(state, cli.static_dir.as_deref());

    let addr: SocketAddr = cli
        .bind
        .parse()
        .with_context(|| format!("Failed to parse bind address {}", cli.bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server listening on {} ({} storage)", addr, kind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

async fn run_seed(cli: &Cli) -> Result<()> {
    let url = cli
        .database_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .context("DATABASE_URL is required for seeding")?;

    let store = PgStore::connect(url, &PoolSettings::default()).await?;
    let fixtures = Fixtures::load().context("Failed to load sample data")?;

    match fixtures
        .seed_into(&store)
        .await
        .context("Failed to seed database")?
    {
        Some(report) => info!(
            "Seeded {} users, {} hotels, {} trip packages, {} bookings, {} reviews, {} travel documents",
            report.users,
            report.hotels,
            report.trip_packages,
            report.bookings,
            report.reviews,
            report.travel_documents
        ),
        None => warn!("Database already contains sample data, nothing to do"),
    }

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
