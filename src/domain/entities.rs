use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::PresentationError;

// Role that may create presentations and read AI settings.
pub const ROLE_ADMIN: &str = "admin";

// Static credential record loaded once at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    // Argon2id PHC string; plaintext passwords are never stored.
    pub password_hash: String,
    pub role: String,
}

// Signed session payload carried by bearer tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: u64,
    pub username: String,
    pub role: String,
    pub iat: u64,
    pub exp: u64,
}

// A stored presentation body, kept as the exact bytes the client sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationDocument {
    raw: String,
}

impl PresentationDocument {
    // Accept any JSON except "nothing": blank bodies, null, {}, [] and "".
    pub fn parse(body: &[u8]) -> Result<Self, PresentationError> {
        let raw = std::str::from_utf8(body).map_err(|_| PresentationError::InvalidDocument)?;
        if raw.trim().is_empty() {
            return Err(PresentationError::EmptyDocument);
        }

        let value: Value =
            serde_json::from_str(raw).map_err(|_| PresentationError::InvalidDocument)?;
        let empty = match &value {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(text) => text.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        };
        if empty {
            return Err(PresentationError::EmptyDocument);
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

// Inference backend reachability as reported by the health endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Live,
    Mock,
    Unreachable,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Live => "live",
            ConnectionStatus::Mock => "mock",
            ConnectionStatus::Unreachable => "unreachable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_body_is_nested_json_then_raw_text_is_kept_verbatim() {
        let body = br#"{ "title": "Atoms",  "slides": [ {"id": 1} ] }"#;

        let document = PresentationDocument::parse(body).expect("expected document to parse");

        assert_eq!(document.as_str().as_bytes(), body);
    }

    #[test]
    fn when_body_is_blank_then_returns_empty_document() {
        let result = PresentationDocument::parse(b"   \n");

        assert!(matches!(result, Err(PresentationError::EmptyDocument)));
    }

    #[test]
    fn when_body_is_empty_object_or_null_then_returns_empty_document() {
        for body in [&b"{}"[..], b"null", b"[]", b"\"\""] {
            let result = PresentationDocument::parse(body);
            assert!(matches!(result, Err(PresentationError::EmptyDocument)));
        }
    }

    #[test]
    fn when_body_is_not_json_then_returns_invalid_document() {
        let result = PresentationDocument::parse(b"{not json");

        assert!(matches!(result, Err(PresentationError::InvalidDocument)));
    }
}
