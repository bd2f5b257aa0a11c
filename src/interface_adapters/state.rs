use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::entities::PresentationDocument;
use crate::domain::ports::{
    Clock, CredentialStore, PasswordVerifier, PresentationStore, SlideGenerator,
};
use crate::use_cases::tokens::TokenService;

pub type PresentationTable = Arc<Mutex<HashMap<String, PresentationDocument>>>;

// Application state shared by every handler.
pub struct AppState {
    // Static credential list loaded at startup.
    pub users: Arc<dyn CredentialStore>,
    pub verifier: Arc<dyn PasswordVerifier>,
    pub tokens: Arc<TokenService>,
    // Presentation documents for the lifetime of the process.
    pub presentations: PresentationTable,
    // Inference proxy or mock, chosen at startup.
    pub generator: Arc<dyn SlideGenerator>,
    pub ai_settings: AiSettings,
}

// Generator configuration reported by the admin settings route.
#[derive(Clone, Debug)]
pub struct AiSettings {
    pub generator: String,
    pub model_name: String,
    pub inference_url: String,
    pub output_name: String,
    pub timeout_ms: u64,
}

// In-memory presentation store adapter.
#[derive(Clone)]
pub struct InMemoryPresentationStore {
    pub documents: PresentationTable,
}

#[async_trait]
impl PresentationStore for InMemoryPresentationStore {
    async fn insert(&self, id: String, document: PresentationDocument) -> Result<(), String> {
        let mut documents = self.documents.lock().await;
        documents.insert(id, document);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PresentationDocument>, String> {
        let documents = self.documents.lock().await;
        Ok(documents.get(id).cloned())
    }

    async fn replace(&self, id: &str, document: PresentationDocument) -> Result<bool, String> {
        let mut documents = self.documents.lock().await;
        match documents.get_mut(id) {
            Some(slot) => {
                *slot = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// System clock adapter used by the auth paths.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
