use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::entities::SessionClaims;
use crate::interface_adapters::error::AppError;
use crate::interface_adapters::protocol::{MessageResponse, PresentationCreatedResponse};
use crate::interface_adapters::state::{AppState, InMemoryPresentationStore};
use crate::use_cases::presentations::{
    CreatePresentationUseCase, GetPresentationUseCase, UpdatePresentationUseCase,
};

fn store(state: &AppState) -> InMemoryPresentationStore {
    InMemoryPresentationStore {
        documents: Arc::clone(&state.presentations),
    }
}

#[tracing::instrument(name = "create_presentation", skip_all, fields(username = %claims.username))]
pub async fn create_presentation(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<SessionClaims>,
    body: Bytes,
) -> Result<(StatusCode, Json<PresentationCreatedResponse>), AppError> {
    let id = CreatePresentationUseCase {
        store: store(&state),
    }
    .execute(&body)
    .await?;

    tracing::info!(%id, "presentation created");

    Ok((
        StatusCode::CREATED,
        Json(PresentationCreatedResponse {
            message: "presentation created".to_string(),
            id,
        }),
    ))
}

// Returns the document exactly as it was stored.
#[tracing::instrument(name = "get_presentation", skip(state))]
pub async fn get_presentation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let document = GetPresentationUseCase {
        store: store(&state),
    }
    .execute(&id)
    .await?;

    Ok(([(CONTENT_TYPE, "application/json")], document.into_string()).into_response())
}

#[tracing::instrument(name = "update_presentation", skip(state, body))]
pub async fn update_presentation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    UpdatePresentationUseCase {
        store: store(&state),
    }
    .execute(&id, &body)
    .await?;

    tracing::info!("presentation updated");

    Ok(Json(MessageResponse {
        message: "presentation updated".to_string(),
    }))
}
