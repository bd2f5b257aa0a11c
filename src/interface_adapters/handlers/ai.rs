use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use std::sync::Arc;

use crate::interface_adapters::error::AppError;
use crate::interface_adapters::protocol::{AiSettingsResponse, GenerateSlidesRequest};
use crate::interface_adapters::state::AppState;
use crate::use_cases::generate_slides::GenerateSlidesUseCase;

// Forward a prompt to the slide generator and relay its JSON untouched.
#[tracing::instrument(name = "generate_slides", skip_all)]
pub async fn generate_slides(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateSlidesRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;

    let use_case = GenerateSlidesUseCase {
        generator: state.generator.as_ref(),
    };
    let slides = use_case.execute(payload.prompt.as_deref()).await?;

    Ok(Json(slides))
}

pub async fn ai_settings(State(state): State<Arc<AppState>>) -> Json<AiSettingsResponse> {
    let settings = &state.ai_settings;
    Json(AiSettingsResponse {
        generator: settings.generator.clone(),
        model_name: settings.model_name.clone(),
        inference_url: settings.inference_url.clone(),
        output_name: settings.output_name.clone(),
        timeout_ms: settings.timeout_ms,
    })
}
