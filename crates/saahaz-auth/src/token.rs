//! HS256 bearer token issuance/verification and session token digests.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearerClaims {
    /// Subject: user ID (UUID string).
    pub sub: String,
    /// Issued-at (Unix timestamp). Tokens minted before it was added
    /// carry only `sub`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration, present only when a lifetime is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl BearerClaims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AuthError::TokenInvalid("subject is not a user id".into()))
    }
}

/// Issue a signed HS256 bearer token for `user_id`.
pub fn issue_bearer_token(user_id: Uuid, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = BearerClaims {
        sub: user_id.to_string(),
        iat: Some(now),
        exp: config
            .bearer_token_lifetime_secs
            .map(|secs| now + secs as i64),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an HS256 bearer token.
///
/// `exp` is checked when present; tokens without it stay valid for as
/// long as the signature verifies.
pub fn decode_bearer_token(token: &str, config: &AuthConfig) -> Result<BearerClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["sub"]);

    let claims = jsonwebtoken::decode::<BearerClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

    if claims.sub.is_empty() {
        return Err(AuthError::TokenInvalid("missing subject".into()));
    }
    Ok(claims)
}

/// SHA-256 digest of a raw session token, hex-encoded.
///
/// This is the value stored in the database as `session.token_hash`.
pub fn hash_session_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}
