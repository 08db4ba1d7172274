use axum::{extract::State, http::StatusCode};

use foodgram_core::error::AppError;

use crate::state::AppState;

/// Handler for `GET /readyz`: the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.db.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "database ping failed");
        AppError::Unavailable
    })?;
    Ok(StatusCode::OK)
}
