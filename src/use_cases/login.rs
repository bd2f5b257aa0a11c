use crate::domain::errors::AuthError;
use crate::domain::ports::{Clock, CredentialStore, PasswordVerifier};
use crate::use_cases::tokens::TokenService;

// Response returned by the login use case.
#[derive(Debug)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub expires_at: u64,
}

// Login use case with injected dependencies.
pub struct LoginUseCase<'a, C, U: ?Sized, P: ?Sized> {
    pub clock: C,
    pub users: &'a U,
    pub verifier: &'a P,
    pub tokens: &'a TokenService,
}

impl<C, U, P> LoginUseCase<'_, C, U, P>
where
    C: Clock,
    U: CredentialStore + ?Sized,
    P: PasswordVerifier + ?Sized,
{
    pub fn execute(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        // Unknown user and wrong password collapse into the same error and
        // pay the same hashing cost.
        let Some(user) = self.users.find_by_username(username) else {
            let _ = self.verifier.verify(password, self.verifier.decoy_hash());
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verifier.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&user, self.clock.now_epoch_seconds())?;

        Ok(LoginResponse {
            token: issued.token,
            role: user.role,
            expires_at: issued.expires_at,
        })
    }
}
