use std::io::{stderr, stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::spawn_blocking;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use bank_account_service::api;
use bank_account_service::config::Config;
use bank_account_service::import::import_file;
use bank_account_service::report::write_report;
use bank_account_service::service::AccountService;
use bank_account_service::storage::AccountStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    setup_logging(config.log_level);

    let storage = Arc::new(AccountStorage::new());
    let service = AccountService::new(storage.clone());

    if let Some(path) = config.seed_path.clone() {
        let seeding_service = service.clone();
        spawn_blocking(move || import_file(&seeding_service, &path)).await??;
    }

    let listener = TcpListener::bind(config.address).await
        .with_context(|| format!("Could not bind to {}", config.address))?;

    info!("Listening on {}", config.address);

    axum::serve(listener, api::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped with {} accounts", storage.len());

    //NOTE: Balances go to stdout so they can be redirected; logs stay on stderr
    write_report(storage.as_ref(), stdout().lock())?;

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        error!("Could not listen for the shutdown signal: {error}");
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received");
}
