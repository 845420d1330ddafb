//! Router construction and server lifecycle.

use crate::config::{HeartbeatConfig, LaureateConfig};
use crate::handlers::{
    get_laureate_by_id, health_check, list_endpoints, list_laureates, metrics_endpoint,
    not_found_fallback, readiness_check,
};
use crate::middleware::readiness_gate;
use crate::services::{
    load_dataset, seed, ConnectionMonitor, ConnectionState, LaureateDb, LaureateStore, SeedReport,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Heartbeats to wait for a connection before giving up on seeding.
const SEED_CONNECT_ATTEMPTS: u32 = 10;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LaureateStore>,
    pub connection: ConnectionMonitor,
}

impl AppState {
    pub fn new(store: Arc<dyn LaureateStore>, connection: ConnectionMonitor) -> Self {
        Self { store, connection }
    }
}

pub fn build_router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/", get(list_endpoints))
        .route("/laureates", get(list_laureates))
        .route("/laureates/id/:id", get(get_laureate_by_id))
        .route_layer(from_fn_with_state(state.connection.clone(), readiness_gate));

    let operational = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint));

    gated
        .merge(operational)
        .fallback(not_found_fallback)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
    heartbeat: HeartbeatConfig,
    seed_report: Option<SeedReport>,
}

impl Application {
    /// Connect to MongoDB and build the application.
    pub async fn build(config: LaureateConfig) -> Result<Self, AppError> {
        let db = LaureateDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
        Self::build_with_store(config, Arc::new(db)).await
    }

    /// Build the application over an already constructed store.
    ///
    /// When the reset flag is set, the collection is reseeded here, before the
    /// listener accepts connections.
    pub async fn build_with_store(
        config: LaureateConfig,
        store: Arc<dyn LaureateStore>,
    ) -> Result<Self, AppError> {
        let connection = ConnectionMonitor::new(config.heartbeat.ping_timeout());

        let seed_report = if config.seed.reset {
            let dataset = load_dataset(config.seed.dataset_path.as_deref()).await?;
            wait_for_connection(&connection, store.as_ref(), &config).await?;
            tracing::info!(records = dataset.len(), "RESET_DB set, reseeding laureates");
            Some(seed(store.as_ref(), &dataset).await?)
        } else {
            None
        };

        // Port 0 picks a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state: AppState::new(store, connection),
            heartbeat: config.heartbeat,
            seed_report,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Report of the startup reseed, if one ran.
    pub fn seed_report(&self) -> Option<&SeedReport> {
        self.seed_report.as_ref()
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let heartbeat = self
            .state
            .connection
            .spawn(self.state.store.clone(), self.heartbeat.interval());

        let router = build_router(self.state);
        tracing::info!(port = self.port, "Server running on http://localhost:{}", self.port);

        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        heartbeat.abort();
        result.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            e
        })
    }
}

async fn wait_for_connection(
    connection: &ConnectionMonitor,
    store: &dyn LaureateStore,
    config: &LaureateConfig,
) -> Result<(), AppError> {
    for attempt in 1..=SEED_CONNECT_ATTEMPTS {
        if connection.refresh(store).await == ConnectionState::Connected {
            return Ok(());
        }
        tracing::warn!(
            attempt,
            max_attempts = SEED_CONNECT_ATTEMPTS,
            "Database not reachable yet, delaying seed"
        );
        if attempt < SEED_CONNECT_ATTEMPTS {
            tokio::time::sleep(config.heartbeat.interval()).await;
        }
    }

    tracing::error!("Giving up on seeding: database never became reachable");
    Err(AppError::ServiceUnavailable)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
