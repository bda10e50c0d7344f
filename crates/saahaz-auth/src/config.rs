//! Authentication configuration.

/// Default external verifier endpoint for the OAuth session proxy.
pub const DEFAULT_VERIFIER_URL: &str =
    "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data";

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 bearer tokens.
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds. `None` issues tokens without an
    /// `exp` claim.
    pub bearer_token_lifetime_secs: Option<u64>,
    /// Absolute session lifetime in seconds (default: 604_800 = 7 days).
    pub session_lifetime_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Minimum password length accepted at registration.
    pub min_password_length: usize,
    /// External identity verifier endpoint.
    pub verifier_url: String,
    /// Header carrying the provider session id to the verifier.
    pub session_header: String,
    /// Per-request timeout for the verifier call, in seconds.
    pub verifier_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            bearer_token_lifetime_secs: None,
            session_lifetime_secs: 604_800,
            pepper: None,
            min_password_length: 8,
            verifier_url: DEFAULT_VERIFIER_URL.into(),
            session_header: "X-Session-ID".into(),
            verifier_timeout_secs: 10,
        }
    }
}
