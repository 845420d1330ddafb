use laureate_service::config::LaureateConfig;
use laureate_service::services::init_metrics;
use laureate_service::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = LaureateConfig::load()?;

    init_tracing(
        "laureate-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;
    init_metrics();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.mongodb.database,
        reset_db = config.seed.reset,
        "Starting laureate service"
    );

    let app = Application::build(config).await?;
    if let Some(report) = app.seed_report() {
        tracing::info!(
            inserted = report.inserted,
            failed = report.failed,
            "Startup seed finished"
        );
    }

    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
