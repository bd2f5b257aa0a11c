use uuid::Uuid;

use crate::domain::entities::PresentationDocument;
use crate::domain::errors::PresentationError;
use crate::domain::ports::PresentationStore;

// Create use case: validates the body and stores it under a fresh id.
pub struct CreatePresentationUseCase<S> {
    pub store: S,
}

impl<S> CreatePresentationUseCase<S>
where
    S: PresentationStore,
{
    pub async fn execute(&self, body: &[u8]) -> Result<String, PresentationError> {
        let document = PresentationDocument::parse(body)?;
        let id = Uuid::new_v4().to_string();

        self.store
            .insert(id.clone(), document)
            .await
            .map_err(PresentationError::StorageFailure)?;

        Ok(id)
    }
}

// Read use case: returns the stored document verbatim.
pub struct GetPresentationUseCase<S> {
    pub store: S,
}

impl<S> GetPresentationUseCase<S>
where
    S: PresentationStore,
{
    pub async fn execute(&self, id: &str) -> Result<PresentationDocument, PresentationError> {
        self.store
            .get(id)
            .await
            .map_err(PresentationError::StorageFailure)?
            .ok_or(PresentationError::NotFound)
    }
}

// Update use case: wholesale replacement, never an upsert.
pub struct UpdatePresentationUseCase<S> {
    pub store: S,
}

impl<S> UpdatePresentationUseCase<S>
where
    S: PresentationStore,
{
    pub async fn execute(&self, id: &str, body: &[u8]) -> Result<(), PresentationError> {
        let document = PresentationDocument::parse(body)?;

        let replaced = self
            .store
            .replace(id, document)
            .await
            .map_err(PresentationError::StorageFailure)?;

        if !replaced {
            return Err(PresentationError::NotFound);
        }

        Ok(())
    }
}
