//! Resolved caller identity.

use serde::Serialize;
use uuid::Uuid;

use super::user::{Role, UserProfile};

/// How the caller proved who they are.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Server-side session created by the external identity provider.
    Session,
    /// Stateless signed bearer token issued at password login.
    Bearer,
}

/// The authenticated user plus role, the unit passed to access checks.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub user: UserProfile,
    pub method: AuthMethod,
}

impl Identity {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}
