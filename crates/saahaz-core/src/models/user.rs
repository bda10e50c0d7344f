//! User domain model.
//!
//! [`User`] is the persisted record and does not implement
//! `Serialize`: anything leaving the process goes through
//! [`UserProfile`], which has no password hash field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Role::Customer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Argon2id PHC string. `None` for accounts created through the
    /// external identity provider.
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_admin: bool,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            is_admin: user.is_admin(),
            email: user.email,
            name: user.name,
            role: user.role,
            address: user.address,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    /// Already-hashed password; hashing happens in the auth layer.
    pub password_hash: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Partial update. Only profile fields and the role are writable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(skip)]
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(role: Role) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "amira@saahaz.com".into(),
            name: "Amira".into(),
            role,
            address: Some("12 Market Rd".into()),
            phone: None,
            password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn profile_json_never_contains_password_hash() {
        let profile = UserProfile::from(sample(Role::Customer));
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "customer");
        assert_eq!(json["is_admin"], false);
    }

    #[test]
    fn admin_flag_follows_role() {
        let profile = UserProfile::from(sample(Role::Admin));
        assert!(profile.is_admin);
    }

    #[test]
    fn role_string_roundtrip() {
        for role in [Role::Customer, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn update_payload_ignores_role() {
        let update: UpdateUser =
            serde_json::from_str(r#"{"name":"New","role":"admin"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("New"));
        assert!(update.role.is_none());
    }
}
