use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::{ConnectionStatus, PresentationDocument, UserRecord};
use crate::domain::errors::InferenceError;

// Port for the static credential list used by login.
pub trait CredentialStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<UserRecord>;
}

// Port for checking a plaintext password against a stored hash.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, password_hash: &str) -> bool;
    // Hash with the same cost as a real one that no password matches.
    fn decoy_hash(&self) -> &str;
}

// Port for presentation storage used by the presentation use cases.
#[async_trait]
pub trait PresentationStore: Send + Sync {
    async fn insert(&self, id: String, document: PresentationDocument) -> Result<(), String>;
    async fn get(&self, id: &str) -> Result<Option<PresentationDocument>, String>;
    // Replaces an existing entry; returns false when the id is unknown.
    async fn replace(&self, id: &str, document: PresentationDocument) -> Result<bool, String>;
}

// Port for whatever turns a prompt into slide JSON.
#[async_trait]
pub trait SlideGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Value, InferenceError>;
    async fn connection_status(&self) -> ConnectionStatus;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}
