use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, shutdown_signal, spawn_poller, AppState};
use case_core::config::{
    api_token_from_env_value, host_from_env_value, poll_interval_from_env_value,
    port_from_env_value,
};
use case_core::{Clock, CoreConfig, SystemClock};

/// Main entry point for the case registry
///
/// Resolves configuration once, builds the shared state and serves the REST API until Ctrl+C or
/// SIGTERM. When a poll interval is configured, a background task imports from the external
/// source on that schedule.
///
/// # Environment Variables
/// - `API_TOKEN`: shared bearer secret (default: "dev-token")
/// - `HOST`: bind host (default: "0.0.0.0")
/// - `PORT`: bind port (default: 5000)
/// - `CASE_POLL_INTERVAL_SECS`: background ingestion interval (default: disabled)
/// - `RUST_LOG`: tracing filter directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any environment value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("case_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("case_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(
        api_token_from_env_value(std::env::var("API_TOKEN").ok()),
        host_from_env_value(std::env::var("HOST").ok()),
        port_from_env_value(std::env::var("PORT").ok())?,
        poll_interval_from_env_value(std::env::var("CASE_POLL_INTERVAL_SECS").ok())?,
    )?;
    tracing::debug!(?cfg, "configuration resolved");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::new(&cfg, clock);

    let poller = cfg.poll_interval().map(|every| {
        tracing::info!("++ Background ingestion every {:?}", every);
        spawn_poller(state.clone(), every)
    });

    let addr = cfg.bind_addr();
    tracing::info!(
        host = cfg.host(),
        port = cfg.port(),
        "++ Starting case registry REST on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(poller) = poller {
        poller.abort();
    }
    tracing::info!("-- Case registry stopped");

    Ok(())
}
