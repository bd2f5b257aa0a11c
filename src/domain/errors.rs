use thiserror::Error;

// Domain-level errors for login and bearer-token workflows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed authorization header")]
    MalformedToken,
    #[error("token expired")]
    ExpiredToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("permission denied")]
    PermissionDenied,
    #[error("failed to sign token: {0}")]
    TokenIssue(String),
}

// Errors raised by presentation storage workflows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresentationError {
    #[error("presentation body is empty")]
    EmptyDocument,
    #[error("presentation body is not valid json")]
    InvalidDocument,
    #[error("presentation not found")]
    NotFound,
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

// Errors raised while turning a prompt into generated slides.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    #[error("prompt is required")]
    EmptyPrompt,
    #[error("inference service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("inference response violated contract: {0}")]
    ContractViolation(String),
    #[error("inference output is not valid json")]
    Decode,
}
