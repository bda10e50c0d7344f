//! Role gate for privileged operations.

use saahaz_core::error::{SaahazError, SaahazResult};
use saahaz_core::models::identity::Identity;
use saahaz_core::models::user::Role;

/// Reject `identity` unless it holds `role`.
pub fn require_role(identity: &Identity, role: Role) -> SaahazResult<()> {
    if identity.role() == role {
        Ok(())
    } else {
        Err(SaahazError::Forbidden {
            reason: format!("{} role required", role.as_str()),
        })
    }
}

pub fn require_admin(identity: &Identity) -> SaahazResult<()> {
    require_role(identity, Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use saahaz_core::models::identity::AuthMethod;
    use saahaz_core::models::user::UserProfile;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity {
            user: UserProfile {
                id: Uuid::new_v4(),
                email: "x@shop.test".into(),
                name: "X".into(),
                role,
                is_admin: role == Role::Admin,
                address: None,
                phone: None,
                created_at: Utc::now(),
            },
            method: AuthMethod::Bearer,
        }
    }

    #[test]
    fn admin_passes() {
        assert!(require_admin(&identity(Role::Admin)).is_ok());
    }

    #[test]
    fn customer_is_forbidden() {
        let err = require_admin(&identity(Role::Customer)).unwrap_err();
        assert!(matches!(err, SaahazError::Forbidden { .. }));
    }

    #[test]
    fn exact_role_match_is_required() {
        assert!(require_role(&identity(Role::Customer), Role::Customer).is_ok());
    }
}
