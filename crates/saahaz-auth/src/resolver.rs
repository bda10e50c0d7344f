//! Resolves request credentials into a single authenticated identity.

use saahaz_core::error::{SaahazError, SaahazResult};
use saahaz_core::models::identity::{AuthMethod, Identity};
use saahaz_core::repository::{SessionRepository, UserRepository};
use tracing::debug;

use crate::config::AuthConfig;
use crate::token;

/// Raw credentials as presented by a caller.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Value of the session cookie, if any.
    pub session_token: Option<String>,
    /// Token from an `Authorization: Bearer` header, if any.
    pub bearer_token: Option<String>,
}

/// Session-first, bearer-second identity resolution.
pub struct IdentityResolver<U: UserRepository, S: SessionRepository> {
    user_repo: U,
    session_repo: S,
    config: AuthConfig,
}

impl<U: UserRepository, S: SessionRepository> IdentityResolver<U, S> {
    pub fn new(user_repo: U, session_repo: S, config: AuthConfig) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Resolve `credentials` to an identity.
    ///
    /// A live session wins. A session that is unknown, expired, or whose
    /// user has vanished falls through to the bearer token. With no
    /// usable credential at all the caller is `Unauthenticated`.
    pub async fn resolve(&self, credentials: &Credentials) -> SaahazResult<Identity> {
        if let Some(raw) = credentials.session_token.as_deref() {
            if let Some(identity) = self.resolve_session(raw).await? {
                return Ok(identity);
            }
        }

        let Some(raw) = credentials.bearer_token.as_deref() else {
            return Err(SaahazError::Unauthenticated);
        };

        let claims = token::decode_bearer_token(raw, &self.config)?;
        let user_id = claims.user_id()?;

        let user = match self.user_repo.get_by_id(user_id).await {
            Ok(user) => user,
            Err(SaahazError::NotFound { .. }) => return Err(SaahazError::UserNotFound),
            Err(e) => return Err(e),
        };

        debug!(user_id = %user.id, "Resolved identity from bearer token");
        Ok(Identity {
            user: user.into(),
            method: AuthMethod::Bearer,
        })
    }

    async fn resolve_session(&self, raw: &str) -> SaahazResult<Option<Identity>> {
        let digest = token::hash_session_token(raw);

        let session = match self.session_repo.get_active_by_token_hash(&digest).await {
            Ok(session) => session,
            Err(SaahazError::NotFound { .. }) => {
                debug!("No live session for presented cookie");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match self.user_repo.get_by_id(session.user_id).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Resolved identity from session");
                Ok(Some(Identity {
                    user: user.into(),
                    method: AuthMethod::Session,
                }))
            }
            Err(SaahazError::NotFound { .. }) => {
                debug!(user_id = %session.user_id, "Session owner no longer exists");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
