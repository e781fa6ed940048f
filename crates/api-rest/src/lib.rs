//! # API REST
//!
//! REST API implementation for the case registry.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Bearer-token gating of everything under `/api`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, request tracing)
//!
//! Uses `api-shared` for common types and `case-core` for data operations.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod middleware;

use api_shared::{BearerAuth, CreateCaseReq, ErrorRes, HealthRes, UpdateCaseReq};
use axum::{
    routing::{get, post},
    Router,
};
use case_core::{
    Case, CaseId, CaseList, CaseSource, CaseStore, Clock, CoreConfig, IngestionService,
    PollOutcome, StubSource,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state for the REST API server
///
/// Shared by every handler. The store is the single owner of all cases; everything else is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CaseStore>,
    pub ingestion: IngestionService,
    pub auth: BearerAuth,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Builds state with an empty store and the stub ingestion source.
    pub fn new(cfg: &CoreConfig, clock: Arc<dyn Clock>) -> Self {
        let source = Arc::new(StubSource::new(clock.clone()));
        Self {
            store: Arc::new(CaseStore::new(clock.clone())),
            ingestion: IngestionService::new(source),
            auth: BearerAuth::new(cfg.api_token()),
            clock,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_cases,
        handlers::create_case,
        handlers::get_case,
        handlers::update_case,
        handlers::poll,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        CreateCaseReq,
        UpdateCaseReq,
        Case,
        CaseId,
        CaseSource,
        CaseList,
        PollOutcome,
    )),
    modifiers(&BearerSecurity)
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Builds the complete router.
///
/// `/health` and the documentation routes are public; every `/api` route requires a bearer
/// token. Unknown paths get a JSON 404.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/cases",
            get(handlers::list_cases).post(handlers::create_case),
        )
        .route(
            "/api/cases/:id",
            get(handlers::get_case).put(handlers::update_case),
        )
        .route("/api/poll", post(handlers::poll))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Spawns a task that polls the ingestion source every `every`.
///
/// The first poll happens one full interval after spawning. Failures are logged and the loop
/// keeps going; abort the returned handle to stop it.
pub fn spawn_poller(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = state.ingestion.poll(&state.store) {
                tracing::warn!("Background poll error: {:?}", e);
            }
        }
    })
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {:?}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {:?}", e);
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

    tracing::info!("-- Shutdown signal received");
}
