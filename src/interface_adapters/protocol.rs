use serde::{Deserialize, Serialize};

// Request payload for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Response payload for login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub expires_at: u64,
}

// Response payload for a newly stored presentation.
#[derive(Debug, Serialize)]
pub struct PresentationCreatedResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// Request payload for slide generation; a missing prompt is a 400, not a 422.
#[derive(Debug, Deserialize)]
pub struct GenerateSlidesRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub triton_connection: &'static str,
}

// Generator configuration exposed to admins.
#[derive(Debug, Serialize)]
pub struct AiSettingsResponse {
    pub generator: String,
    pub model_name: String,
    pub inference_url: String,
    pub output_name: String,
    pub timeout_ms: u64,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
