//! External identity verification against the OAuth session proxy.

use std::time::Duration;

use reqwest::Client;
use saahaz_core::error::{SaahazError, SaahazResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AuthConfig;

/// Identity asserted by the external provider for a session id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalIdentity {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    /// Opaque token that becomes the local session credential.
    pub session_token: String,
}

/// Resolves a provider session id into an [`ExternalIdentity`].
///
/// Failures of any kind surface as
/// [`SaahazError::ExternalVerification`].
pub trait IdentityVerifier: Send + Sync {
    fn verify(
        &self,
        session_id: &str,
    ) -> impl Future<Output = SaahazResult<ExternalIdentity>> + Send;
}

/// [`IdentityVerifier`] that calls the provider over HTTPS.
#[derive(Clone)]
pub struct HttpIdentityVerifier {
    client: Client,
    url: String,
    header: String,
    timeout: Duration,
}

impl HttpIdentityVerifier {
    pub fn new(
        client: Client,
        url: impl Into<String>,
        header: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            header: header.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            Client::new(),
            config.verifier_url.clone(),
            config.session_header.clone(),
            Duration::from_secs(config.verifier_timeout_secs),
        )
    }
}

impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, session_id: &str) -> SaahazResult<ExternalIdentity> {
        let resp = self
            .client
            .get(&self.url)
            .header(self.header.as_str(), session_id)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SaahazError::ExternalVerification(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%status, "Identity provider rejected session id");
            return Err(SaahazError::ExternalVerification(format!(
                "provider returned {status}"
            )));
        }

        resp.json::<ExternalIdentity>()
            .await
            .map_err(|e| SaahazError::ExternalVerification(format!("malformed response: {e}")))
    }
}
