//! subrp-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! configured document store and serves the subscription API over HTTP.
//!
//! The readiness gate opens once the listener is bound and closes as soon as
//! a shutdown signal arrives, so `/healthz` reports 500 while in-flight
//! requests drain.

mod settings;

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use subrp_api::{AppState, Readiness};
use subrp_core::{cache::MemoryStore, store::DocumentStore};
use subrp_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, StoreConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Subscription resource-provider front end")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  if let Some(port) = server_cfg.metrics_port {
    let address = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
      .with_http_listener(address)
      .install()
      .context("failed to install Prometheus exporter")?;
    tracing::info!("Serving metrics on http://{address}/metrics");
  }

  match &server_cfg.store {
    StoreConfig::Memory => {
      tracing::warn!("using in-memory store; documents are lost on exit");
      serve(MemoryStore::new(), &server_cfg).await
    }
    StoreConfig::Sqlite { path } => {
      let store_path = expand_tilde(path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      serve(store, &server_cfg).await
    }
  }
}

async fn serve<S>(store: S, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: DocumentStore + Clone + 'static,
{
  let state = AppState::new(store);
  let readiness = state.readiness.clone();
  let app = subrp_api::router(state).layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  readiness.set(true);
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal(readiness))
    .await
    .context("server error")?;

  tracing::info!("shutdown complete");
  Ok(())
}

/// Resolve on Ctrl+C or SIGTERM, closing the readiness gate first.
async fn shutdown_signal(readiness: Readiness) {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
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

  readiness.set(false);
  tracing::info!("shutdown signal received; readiness gate closed");
}
