use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::entities::{SessionClaims, UserRecord};
use crate::domain::errors::AuthError;

// Session lifetime for issued bearer tokens (in seconds).
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

// Token plus the expiry baked into its claims.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

// Issues and verifies HS256 session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in verify().
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, user: &UserRecord, now: u64) -> Result<IssuedToken, AuthError> {
        let expires_at = now
            .checked_add(self.ttl_seconds)
            .ok_or_else(|| AuthError::TokenIssue("token expiry overflows".to_string()))?;
        let claims = SessionClaims {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now,
            exp: expires_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| AuthError::TokenIssue(err.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    // A token is valid only if the signature verifies and now < exp.
    pub fn verify(&self, token: &str, now: u64) -> Result<SessionClaims, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;

        if data.claims.exp <= now {
            return Err(AuthError::ExpiredToken);
        }

        Ok(data.claims)
    }
}

// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthError::MalformedToken),
    }
}

// Coarse role check applied after the token itself has been verified.
pub fn authorize(claims: &SessionClaims, required_role: Option<&str>) -> Result<(), AuthError> {
    match required_role {
        Some(role) if claims.role != role => Err(AuthError::PermissionDenied),
        _ => Ok(()),
    }
}
