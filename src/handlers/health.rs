use axum::{extract::State, response::Json};
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::schemas::{AppState, ErrorResponse, HealthResponse};

/// Liveness plus a database round trip.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 500, description = "Database did not answer the ping", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    if let Err(e) = state.db.ping().await {
        warn!("Database ping failed: {}", e);
        return Err(AppError::Database(e));
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "connected".to_string(),
    }))
}
