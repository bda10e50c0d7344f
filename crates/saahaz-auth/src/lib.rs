//! Saahaz Auth: password login, bearer tokens, externally verified
//! sessions and role gating.

pub mod access;
pub mod config;
pub mod error;
pub mod password;
pub mod resolver;
pub mod service;
pub mod token;
pub mod verifier;

pub use access::{require_admin, require_role};
pub use config::AuthConfig;
pub use error::AuthError;
pub use resolver::{Credentials, IdentityResolver};
pub use service::{AuthOutput, AuthService, RegisterInput, SessionOutput};
pub use token::BearerClaims;
pub use verifier::{ExternalIdentity, HttpIdentityVerifier, IdentityVerifier};
