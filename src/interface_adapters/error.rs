use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::errors::{AuthError, InferenceError, PresentationError};
use crate::interface_adapters::protocol::ErrorResponse;

// Everything a handler can fail with; each request fails terminally.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Presentation(#[from] PresentationError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(err) => match err {
                AuthError::PermissionDenied => StatusCode::FORBIDDEN,
                AuthError::TokenIssue(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::MalformedToken
                | AuthError::ExpiredToken
                | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            },
            AppError::Presentation(err) => match err {
                PresentationError::EmptyDocument | PresentationError::InvalidDocument => {
                    StatusCode::BAD_REQUEST
                }
                PresentationError::NotFound => StatusCode::NOT_FOUND,
                PresentationError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Inference(err) => match err {
                InferenceError::EmptyPrompt => StatusCode::BAD_REQUEST,
                InferenceError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                InferenceError::ContractViolation(_) | InferenceError::Decode => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Short description for the caller; upstream and internal detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Auth(AuthError::TokenIssue(_))
            | AppError::Presentation(PresentationError::StorageFailure(_))
            | AppError::Internal(_) => "internal server error".to_string(),
            AppError::Inference(InferenceError::ServiceUnavailable(_)) => {
                "inference service unavailable".to_string()
            }
            AppError::Inference(InferenceError::ContractViolation(_)) => {
                "inference service returned an unexpected response".to_string()
            }
            AppError::Inference(InferenceError::Decode) => {
                "inference service returned malformed output".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
