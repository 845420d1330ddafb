//! Rejects requests while the database is unreachable.

use crate::services::ConnectionMonitor;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

/// Short-circuits with 503 `{"error": "Service unavailable"}` unless the
/// last heartbeat saw the database connected. The wrapped handler is not run.
pub async fn readiness_gate(
    State(connection): State<ConnectionMonitor>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !connection.is_connected() {
        tracing::warn!(
            path = %req.uri().path(),
            state = %connection.state(),
            "Rejecting request: database not connected"
        );
        return Err(AppError::ServiceUnavailable);
    }

    Ok(next.run(req).await)
}
