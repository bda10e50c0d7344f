//! Authentication error types.

use saahaz_core::error::SaahazError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for SaahazError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => SaahazError::InvalidCredentials,
            AuthError::TokenInvalid(msg) => SaahazError::InvalidToken(msg),
            AuthError::Crypto(msg) => SaahazError::Crypto(msg),
        }
    }
}
