use axum::{Json, extract::State};
use std::sync::Arc;

use crate::domain::entities::ConnectionStatus;
use crate::domain::errors::InferenceError;
use crate::interface_adapters::error::AppError;
use crate::interface_adapters::protocol::{HealthResponse, StatusResponse};
use crate::interface_adapters::state::AppState;

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

// Liveness of this server plus its inference backend.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    match state.generator.connection_status().await {
        ConnectionStatus::Unreachable => Err(AppError::Inference(
            InferenceError::ServiceUnavailable("inference server is not live".to_string()),
        )),
        connection => Ok(Json(HealthResponse {
            status: "ok",
            triton_connection: connection.as_str(),
        })),
    }
}
