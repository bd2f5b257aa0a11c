use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::entities::ConnectionStatus;
use crate::domain::errors::InferenceError;
use crate::domain::ports::SlideGenerator;

// Canned slides for running the frontend without an inference server.
#[derive(Clone, Debug, Default)]
pub struct MockSlideGenerator;

#[async_trait]
impl SlideGenerator for MockSlideGenerator {
    async fn generate(&self, prompt: &str) -> Result<Value, InferenceError> {
        tracing::info!("returning mock slides");
        Ok(json!({
            "slides": [
                {
                    "id": 1,
                    "type": "title_slide",
                    "content": {
                        "title": prompt,
                        "subtitle": "Generated draft"
                    }
                },
                {
                    "id": 2,
                    "type": "text_slide",
                    "content": {
                        "title": "Key points",
                        "text": "Replace this slide with generated content."
                    }
                }
            ]
        }))
    }

    async fn connection_status(&self) -> ConnectionStatus {
        ConnectionStatus::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn when_prompt_is_given_then_title_slide_uses_it() {
        let slides = MockSlideGenerator
            .generate("Structure of the atom")
            .await
            .expect("expected mock generation to succeed");

        assert_eq!(slides["slides"][0]["content"]["title"], "Structure of the atom");
        assert_eq!(slides["slides"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn when_status_is_requested_then_reports_mock() {
        assert_eq!(
            MockSlideGenerator.connection_status().await,
            ConnectionStatus::Mock
        );
    }
}
