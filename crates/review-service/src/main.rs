//! Review Service - HTTP API for versioned product reviews.
//!
//! This binary serves the review API on port 8080 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` document table for reviews (or an in-memory store for local runs)
//! - Sentry for error tracking, `tracing` for structured logs

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use review_service::config::{ConfigError, ServiceConfig, StoreBackend};
use review_service::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reasons the service can fail to start or keep serving.
#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("review store: {0}")]
    Store(#[from] sqlx::Error),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize Sentry, tagging every event with the store backend.
fn init_sentry(config: &ServiceConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    sentry::configure_scope(|scope| {
        scope.set_tag("review_store", config.store.kind());
    });

    Some(guard)
}

/// Map tracing levels to Sentry: warnings and errors become events, info
/// becomes breadcrumbs. Per-lookup debug logs are dropped.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(log_json: bool) {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "review_service=info,tower_http=debug".into());

    let json_layer = log_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!log_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not set up yet; the operator only has stderr.
            eprintln!("review-service: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_json);

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "review service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: ServiceConfig) -> Result<(), StartupError> {
    tracing::info!(store = ?config.store, "Opening review store");
    let store = review_service::open_store(&config.store).await?;

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p review-cli -- migrate

    let app = review_service::app(AppState::new(store))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, store = config.store.kind(), "review service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(matches!(
            config.store,
            StoreBackend::Memory
        )))
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed, that signal is never delivered and the
/// other one still works.
async fn shutdown_signal(in_memory_store: bool) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    if in_memory_store {
        tracing::warn!("Shutting down; reviews held in the in-memory store are discarded");
    } else {
        tracing::info!("Shutdown signal received, starting graceful shutdown");
    }
}
