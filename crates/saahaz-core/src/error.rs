//! Error types for the Saahaz system.

use thiserror::Error;

/// Coarse classification of a failure, used by transports to pick a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Authentication,
    Authorization,
    NotFound,
    Validation,
    Conflict,
    /// An upstream dependency (the identity provider) failed.
    Upstream,
    Internal,
}

#[derive(Debug, Error)]
pub enum SaahazError {
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Product {id} not found")]
    ProductNotFound { id: String },

    #[error("External identity verification failed: {0}")]
    ExternalVerification(String),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

impl SaahazError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidCredentials
            | Self::Unauthenticated
            | Self::InvalidToken(_)
            | Self::UserNotFound => ErrorClass::Authentication,
            Self::Forbidden { .. } => ErrorClass::Authorization,
            Self::NotFound { .. } | Self::ProductNotFound { .. } => ErrorClass::NotFound,
            Self::Validation { .. } => ErrorClass::Validation,
            Self::DuplicateEmail { .. } => ErrorClass::Conflict,
            Self::ExternalVerification(_) => ErrorClass::Upstream,
            Self::Database(_) | Self::Crypto(_) => ErrorClass::Internal,
        }
    }
}

pub type SaahazResult<T> = Result<T, SaahazError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_authentication_class() {
        assert_eq!(
            SaahazError::InvalidCredentials.class(),
            ErrorClass::Authentication
        );
        assert_eq!(
            SaahazError::InvalidToken("bad".into()).class(),
            ErrorClass::Authentication
        );
        assert_eq!(SaahazError::UserNotFound.class(), ErrorClass::Authentication);
    }

    #[test]
    fn upstream_failure_is_distinguishable() {
        let err = SaahazError::ExternalVerification("timeout".into());
        assert_eq!(err.class(), ErrorClass::Upstream);
        assert_ne!(err.class(), SaahazError::Unauthenticated.class());
    }

    #[test]
    fn product_not_found_names_the_id() {
        let err = SaahazError::ProductNotFound { id: "p-42".into() };
        assert_eq!(err.to_string(), "Product p-42 not found");
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let err = SaahazError::DuplicateEmail {
            email: "a@b.c".into(),
        };
        assert_eq!(err.class(), ErrorClass::Conflict);
    }
}
