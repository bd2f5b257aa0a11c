use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier as _, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use std::{fs, path::Path};
use tracing::{error, info, warn};

use crate::domain::entities::UserRecord;
use crate::domain::ports::{CredentialStore, PasswordVerifier};

// Credential list read once from a JSON array of user records.
#[derive(Clone, Debug, Default)]
pub struct FileCredentialStore {
    users: Vec<UserRecord>,
}

impl FileCredentialStore {
    // A missing or broken file leaves the store empty so the server still starts.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                error!(path = %path.display(), error = %e, "users file could not be read; logins will fail");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<UserRecord>>(&text) {
            Ok(users) => {
                info!(path = %path.display(), count = users.len(), "users loaded");
                Self { users }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "users file is not a valid user list; logins will fail");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for FileCredentialStore {
    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }
}

// Fixed salt and digest for the decoy hash; only its cost matters.
const DECOY_SALT: &str = "c2xpZGVzLWRlY295LXNsdA";
const DECOY_DIGEST: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

// Argon2id hashing for stored passwords.
#[derive(Clone, Debug)]
pub struct Argon2PasswordHasher {
    params: Params,
    decoy_hash: String,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    // Cost parameters only affect new hashes; verification reads them from the PHC string.
    pub fn with_params(params: Params) -> Self {
        let decoy_hash = format!(
            "$argon2id$v=19$m={},t={},p={}${DECOY_SALT}${DECOY_DIGEST}",
            params.m_cost(),
            params.t_cost(),
            params.p_cost()
        );
        Self { params, decoy_hash }
    }

    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }
}

impl PasswordVerifier for Argon2PasswordHasher {
    fn verify(&self, password: &str, password_hash: &str) -> bool {
        let parsed = match PasswordHash::new(password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "stored password hash is not a valid PHC string");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }
}
