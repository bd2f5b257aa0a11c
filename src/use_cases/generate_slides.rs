use serde_json::Value;

use crate::domain::errors::InferenceError;
use crate::domain::ports::SlideGenerator;

// Slide generation use case; rejects blank prompts before any upstream work.
pub struct GenerateSlidesUseCase<'a, G: ?Sized> {
    pub generator: &'a G,
}

impl<G> GenerateSlidesUseCase<'_, G>
where
    G: SlideGenerator + ?Sized,
{
    pub async fn execute(&self, prompt: Option<&str>) -> Result<Value, InferenceError> {
        let prompt = prompt
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
            .ok_or(InferenceError::EmptyPrompt)?;

        self.generator.generate(prompt).await
    }
}
