use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use crate::interface_adapters::error::AppError;
use crate::interface_adapters::protocol::{LoginRequest, LoginResponse};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::login::LoginUseCase;

// Handler for exchanging credentials for a bearer token.
#[tracing::instrument(
    name = "login",
    skip_all,
    fields(username = tracing::field::Empty)
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;
    tracing::Span::current().record("username", payload.username.as_str());

    // Argon2 verification is CPU-bound; keep it off the async workers.
    let task_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        let use_case = LoginUseCase {
            clock: SystemClock,
            users: task_state.users.as_ref(),
            verifier: task_state.verifier.as_ref(),
            tokens: task_state.tokens.as_ref(),
        };
        use_case.execute(&payload.username, &payload.password)
    })
    .await
    .map_err(|e| AppError::Internal(format!("login task failed: {e}")))??;

    tracing::info!(role = %result.role, "login succeeded");

    Ok(Json(LoginResponse {
        token: result.token,
        role: result.role,
        expires_at: result.expires_at,
    }))
}
