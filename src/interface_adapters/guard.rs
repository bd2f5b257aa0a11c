use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::errors::AuthError;
use crate::domain::ports::Clock;
use crate::interface_adapters::error::AppError;
use crate::interface_adapters::state::SystemClock;
use crate::use_cases::tokens::{TokenService, authorize, bearer_token};

// Who may pass a guarded route: any valid token, or one with a given role.
#[derive(Clone)]
pub struct AccessPolicy {
    tokens: Arc<TokenService>,
    required_role: Option<&'static str>,
}

impl AccessPolicy {
    pub fn authenticated(tokens: Arc<TokenService>) -> Self {
        Self {
            tokens,
            required_role: None,
        }
    }

    pub fn role(tokens: Arc<TokenService>, role: &'static str) -> Self {
        Self {
            tokens,
            required_role: Some(role),
        }
    }
}

// Route-layer middleware; verified claims are handed to handlers as an extension.
pub async fn require_token(
    State(policy): State<AccessPolicy>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedToken)?),
        None => None,
    };
    let token = bearer_token(header)?;
    let claims = policy
        .tokens
        .verify(token, SystemClock.now_epoch_seconds())?;
    authorize(&claims, policy.required_role)?;

    tracing::debug!(username = %claims.username, role = %claims.role, "bearer token accepted");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
