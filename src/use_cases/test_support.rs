use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::{ConnectionStatus, PresentationDocument, UserRecord};
use crate::domain::errors::InferenceError;
use crate::domain::ports::{
    Clock, CredentialStore, PasswordVerifier, PresentationStore, SlideGenerator,
};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

pub(crate) fn user(id: u64, username: &str, password_hash: &str, role: &str) -> UserRecord {
    UserRecord {
        id,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        role: role.to_string(),
    }
}

// Credential list without any file loading.
pub(crate) struct StaticUsers(pub(crate) Vec<UserRecord>);

impl CredentialStore for StaticUsers {
    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.0.iter().find(|user| user.username == username).cloned()
    }
}

// Treats "plain:<password>" as the hash of <password>; keeps tests off argon2.
pub(crate) struct PrefixVerifier;

impl PasswordVerifier for PrefixVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> bool {
        password_hash.strip_prefix("plain:") == Some(password)
    }

    fn decoy_hash(&self) -> &str {
        "decoy"
    }
}

// Prefix verifier that remembers every hash it was asked to check.
#[derive(Default)]
pub(crate) struct RecordingVerifier {
    checked: Mutex<Vec<String>>,
}

impl RecordingVerifier {
    pub(crate) fn checked_hashes(&self) -> Vec<String> {
        self.checked.lock().expect("checked mutex poisoned").clone()
    }
}

impl PasswordVerifier for RecordingVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> bool {
        self.checked
            .lock()
            .expect("checked mutex poisoned")
            .push(password_hash.to_string());
        PrefixVerifier.verify(password, password_hash)
    }

    fn decoy_hash(&self) -> &str {
        "decoy"
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub get: bool,
    pub replace: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingPresentationStore {
    documents: Arc<Mutex<HashMap<String, PresentationDocument>>>,
    failures: FailureFlags,
}

impl RecordingPresentationStore {
    pub(crate) fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn get_test_document(&self, id: &str) -> Option<PresentationDocument> {
        let guard = self.documents.lock().expect("documents mutex poisoned");
        guard.get(id).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.lock().expect("documents mutex poisoned").len()
    }
}

#[async_trait]
impl PresentationStore for RecordingPresentationStore {
    async fn insert(&self, id: String, document: PresentationDocument) -> Result<(), String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.documents.lock().expect("documents mutex poisoned");
        guard.insert(id, document);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PresentationDocument>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.documents.lock().expect("documents mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn replace(&self, id: &str, document: PresentationDocument) -> Result<bool, String> {
        if self.failures.replace {
            return Err("replace failed".to_string());
        }

        let mut guard = self.documents.lock().expect("documents mutex poisoned");
        match guard.get_mut(id) {
            Some(slot) => {
                *slot = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// Generator stub that records how often and with what it was called.
pub(crate) struct CountingGenerator {
    result: Result<Value, InferenceError>,
    status: ConnectionStatus,
    prompts: Mutex<Vec<String>>,
}

impl CountingGenerator {
    pub(crate) fn returning(result: Result<Value, InferenceError>) -> Self {
        Self {
            result,
            status: ConnectionStatus::Live,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_status(mut self, status: ConnectionStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().expect("prompts mutex poisoned").len()
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts
            .lock()
            .expect("prompts mutex poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl SlideGenerator for CountingGenerator {
    async fn generate(&self, prompt: &str) -> Result<Value, InferenceError> {
        self.prompts
            .lock()
            .expect("prompts mutex poisoned")
            .push(prompt.to_string());
        self.result.clone()
    }

    async fn connection_status(&self) -> ConnectionStatus {
        self.status
    }
}
