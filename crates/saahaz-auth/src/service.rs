//! Authentication service: registration, password login, external
//! session exchange, logout and profile management.

use chrono::{Duration, Utc};
use saahaz_core::error::{SaahazError, SaahazResult};
use saahaz_core::models::identity::Identity;
use saahaz_core::models::session::CreateSession;
use saahaz_core::models::user::{CreateUser, Role, UpdateUser, User, UserProfile};
use saahaz_core::repository::{SessionRepository, UserRepository};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::access;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;
use crate::verifier::{ExternalIdentity, IdentityVerifier};

/// Emails are stored and looked up without surrounding whitespace.
fn normalize_email(email: &str) -> &str {
    email.trim()
}

/// Input for the registration flow.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Bearer token plus the user it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutput {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserProfile,
}

/// Result of exchanging a provider session id.
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub user: UserProfile,
    pub identity: ExternalIdentity,
    /// Raw session token to hand back as a cookie. Only its digest is
    /// stored.
    pub session_token: String,
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over repository and verifier implementations so that the
/// auth layer has no dependency on the database crate.
pub struct AuthService<U: UserRepository, S: SessionRepository, V: IdentityVerifier> {
    user_repo: U,
    session_repo: S,
    verifier: V,
    config: AuthConfig,
}

impl<U, S, V> AuthService<U, S, V>
where
    U: UserRepository,
    S: SessionRepository,
    V: IdentityVerifier,
{
    pub fn new(user_repo: U, session_repo: S, verifier: V, config: AuthConfig) -> Self {
        Self {
            user_repo,
            session_repo,
            verifier,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create a customer account and sign it in.
    pub async fn register(&self, input: RegisterInput) -> SaahazResult<AuthOutput> {
        let email = normalize_email(&input.email);
        if !email.contains('@') {
            return Err(SaahazError::validation("email must contain '@'"));
        }
        if input.name.trim().is_empty() {
            return Err(SaahazError::validation("name must not be empty"));
        }
        if input.password.chars().count() < self.config.min_password_length {
            return Err(SaahazError::validation(format!(
                "password must be at least {} characters",
                self.config.min_password_length
            )));
        }

        let password_hash = password::hash_password(&input.password, self.config.pepper.as_deref())?;

        let user = self
            .user_repo
            .create(CreateUser {
                email: email.to_string(),
                name: input.name,
                password_hash: Some(password_hash),
                address: input.address,
                phone: input.phone,
            })
            .await?;

        self.sign_in(user)
    }

    /// Check an email/password pair.
    ///
    /// Unknown email, wrong password and password-less accounts are
    /// indistinguishable to the caller.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> SaahazResult<User> {
        let user = match self.user_repo.get_by_email(normalize_email(email)).await {
            Ok(user) => user,
            Err(SaahazError::NotFound { .. }) => return Err(AuthError::InvalidCredentials.into()),
            Err(e) => return Err(e),
        };

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify_password(password, hash, self.config.pepper.as_deref())? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> SaahazResult<AuthOutput> {
        let user = self.verify_credentials(email, password).await?;
        info!(user_id = %user.id, "Password login");
        self.sign_in(user)
    }

    fn sign_in(&self, user: User) -> SaahazResult<AuthOutput> {
        let access_token = token::issue_bearer_token(user.id, &self.config)?;
        Ok(AuthOutput {
            access_token,
            token_type: "bearer",
            user: user.into(),
        })
    }

    /// Exchange a provider session id for a local session.
    ///
    /// The user is found by email or created without a password. Every
    /// exchange creates a new session record.
    pub async fn exchange_external_session(&self, session_id: &str) -> SaahazResult<SessionOutput> {
        if session_id.trim().is_empty() {
            return Err(SaahazError::validation(format!(
                "session id required in {} header",
                self.config.session_header
            )));
        }

        let identity = self.verifier.verify(session_id).await?;
        let user = self.find_or_create_external_user(&identity).await?;

        let expires_in = self.config.session_lifetime_secs;
        let expires_at = Utc::now() + Duration::seconds(expires_in as i64);

        self.session_repo
            .create(CreateSession {
                user_id: user.id,
                token_hash: token::hash_session_token(&identity.session_token),
                expires_at,
            })
            .await?;

        info!(user_id = %user.id, "External session established");
        Ok(SessionOutput {
            user: user.into(),
            session_token: identity.session_token.clone(),
            identity,
            expires_in,
        })
    }

    async fn find_or_create_external_user(&self, identity: &ExternalIdentity) -> SaahazResult<User> {
        match self.user_repo.get_by_email(&identity.email).await {
            Ok(user) => return Ok(user),
            Err(SaahazError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let created = self
            .user_repo
            .create(CreateUser {
                email: identity.email.clone(),
                name: identity.name.clone(),
                password_hash: None,
                address: None,
                phone: None,
            })
            .await;

        match created {
            Ok(user) => Ok(user),
            // Lost a concurrent first-login race; the winner's row is ours.
            Err(SaahazError::DuplicateEmail { .. }) => {
                self.user_repo.get_by_email(&identity.email).await
            }
            Err(e) => Err(e),
        }
    }

    /// Delete every session matching the presented token, if any.
    pub async fn logout(&self, session_token: Option<&str>) -> SaahazResult<()> {
        let Some(raw) = session_token else {
            return Ok(());
        };
        let removed = self
            .session_repo
            .delete_by_token_hash(&token::hash_session_token(raw))
            .await?;
        info!(removed, "Logout");
        Ok(())
    }

    pub async fn get_profile(&self, identity: &Identity) -> SaahazResult<UserProfile> {
        let user = self.user_repo.get_by_id(identity.user_id()).await?;
        Ok(user.into())
    }

    /// Update the caller's own name, address and phone.
    pub async fn update_profile(
        &self,
        identity: &Identity,
        mut input: UpdateUser,
    ) -> SaahazResult<UserProfile> {
        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(SaahazError::validation("name must not be empty"));
        }
        input.role = None;

        let user = self.user_repo.update(identity.user_id(), input).await?;
        Ok(user.into())
    }

    /// Grant `role` to another user. Admin only.
    pub async fn set_role(
        &self,
        identity: &Identity,
        user_id: Uuid,
        role: Role,
    ) -> SaahazResult<UserProfile> {
        access::require_admin(identity)?;
        let user = self.assign_role(user_id, role).await?;
        warn!(
            actor = %identity.user_id(),
            target = %user.id,
            role = role.as_str(),
            "Role changed"
        );
        Ok(user)
    }

    /// Operator bootstrap: promote an account by email without an
    /// authenticated caller.
    pub async fn promote_by_email(&self, email: &str) -> SaahazResult<UserProfile> {
        let user = self.user_repo.get_by_email(normalize_email(email)).await?;
        let profile = self.assign_role(user.id, Role::Admin).await?;
        warn!(target = %profile.id, "Promoted to admin by operator");
        Ok(profile)
    }

    async fn assign_role(&self, user_id: Uuid, role: Role) -> SaahazResult<UserProfile> {
        let user = self
            .user_repo
            .update(
                user_id,
                UpdateUser {
                    role: Some(role),
                    ..Default::default()
                },
            )
            .await?;
        Ok(user.into())
    }
}
