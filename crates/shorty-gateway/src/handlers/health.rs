use crate::error::{ApiError, Result};
use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Database connectivity check. The repository bounds the wait itself.
pub async fn ping_handler(State(state): State<AppState>) -> Result<StatusCode> {
    let pinger = state.pinger().ok_or(ApiError::DatabaseNotConfigured)?;
    pinger.ping().await?;
    Ok(StatusCode::OK)
}
