use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::domain::entities::ConnectionStatus;
use crate::domain::errors::InferenceError;
use crate::domain::ports::SlideGenerator;

const PROMPT_INPUT_NAME: &str = "prompt";
const PROMPT_LOG_PREVIEW_CHARS: usize = 70;

// KServe v2 infer request carrying a single BYTES tensor.
#[derive(Debug, Serialize)]
struct InferRequest<'a> {
    inputs: [InferInput<'a>; 1],
}

#[derive(Debug, Serialize)]
struct InferInput<'a> {
    name: &'static str,
    shape: [u64; 1],
    datatype: &'static str,
    data: [&'a str; 1],
}

impl<'a> InferRequest<'a> {
    fn for_prompt(prompt: &'a str) -> Self {
        Self {
            inputs: [InferInput {
                name: PROMPT_INPUT_NAME,
                shape: [1],
                datatype: "BYTES",
                data: [prompt],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferResponse {
    outputs: Vec<InferOutput>,
}

#[derive(Debug, Deserialize)]
struct InferOutput {
    name: String,
    #[serde(default)]
    data: Vec<Value>,
}

// Thin reqwest client for the inference server's HTTP protocol.
#[derive(Clone, Debug)]
pub struct TritonClient {
    http: reqwest::Client,
    base_url: String,
    model_name: String,
    output_name: String,
}

impl TritonClient {
    pub fn new(
        base_url: impl Into<String>,
        model_name: impl Into<String>,
        output_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_name: model_name.into(),
            output_name: output_name.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn is_live(&self) -> bool {
        let url = format!("{}/v2/health/live", self.base_url);
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(status = %response.status(), "inference server reported not live");
                false
            }
            Err(e) => {
                debug!(error = %e, "inference liveness probe failed");
                false
            }
        }
    }

    pub async fn infer(&self, prompt: &str) -> Result<Value, InferenceError> {
        let preview: String = prompt.chars().take(PROMPT_LOG_PREVIEW_CHARS).collect();
        info!(model = %self.model_name, prompt = %preview, "sending prompt to inference server");

        let url = format!("{}/v2/models/{}/infer", self.base_url, self.model_name);
        let response = self
            .http
            .post(url)
            .json(&InferRequest::for_prompt(prompt))
            .send()
            .await
            .map_err(|e| InferenceError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::ServiceUnavailable(format!(
                "inference server returned {status}"
            )));
        }

        // A body that stalls past the timeout is still an availability problem.
        let body = response
            .bytes()
            .await
            .map_err(|e| InferenceError::ServiceUnavailable(e.to_string()))?;
        let envelope = serde_json::from_slice::<InferResponse>(&body)
            .map_err(|e| InferenceError::ContractViolation(format!("bad infer response: {e}")))?;

        let generated = extract_generated_json(envelope, &self.output_name)?;
        info!("inference response decoded");
        Ok(generated)
    }
}

// Pull `outputs[name == output_name].data[0]` and parse it as JSON.
fn extract_generated_json(
    envelope: InferResponse,
    output_name: &str,
) -> Result<Value, InferenceError> {
    let output = envelope
        .outputs
        .into_iter()
        .find(|output| output.name == output_name)
        .ok_or_else(|| {
            InferenceError::ContractViolation(format!("output {output_name} missing"))
        })?;

    let text = match output.data.into_iter().next() {
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(InferenceError::ContractViolation(format!(
                "output {output_name} is not a string: {other}"
            )));
        }
        None => {
            return Err(InferenceError::ContractViolation(format!(
                "output {output_name} has no data"
            )));
        }
    };

    serde_json::from_str(&text).map_err(|e| {
        // The raw payload only goes to the server log.
        error!(error = %e, payload = %text, "inference output is not valid json");
        InferenceError::Decode
    })
}

// Slide generator backed by the inference server. Holds no client when the
// startup liveness check failed, so every call fails fast.
#[derive(Debug)]
pub struct InferenceProxy {
    client: Option<TritonClient>,
}

impl InferenceProxy {
    pub async fn connect(client: TritonClient) -> Self {
        if client.is_live().await {
            info!(url = %client.base_url(), "connected to inference server");
            Self {
                client: Some(client),
            }
        } else {
            error!(url = %client.base_url(), "inference server is not live; generation disabled");
            Self::disconnected()
        }
    }

    pub fn disconnected() -> Self {
        Self { client: None }
    }
}

#[async_trait]
impl SlideGenerator for InferenceProxy {
    async fn generate(&self, prompt: &str) -> Result<Value, InferenceError> {
        let client = self.client.as_ref().ok_or_else(|| {
            InferenceError::ServiceUnavailable("inference client is not initialized".to_string())
        })?;

        client.infer(prompt).await
    }

    async fn connection_status(&self) -> ConnectionStatus {
        match &self.client {
            Some(client) if client.is_live().await => ConnectionStatus::Live,
            _ => ConnectionStatus::Unreachable,
        }
    }
}
