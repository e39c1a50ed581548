//! Role and ownership checks.

use crate::Claims;
use seatbook_core::{SeatbookError, SeatbookResult, UserId, UserRole};

/// Extension trait for Claims to check permissions.
pub trait ClaimsExt {
    /// Requires a specific role.
    fn require_role(&self, role: UserRole) -> SeatbookResult<()>;

    /// Requires the caller to be an admin.
    fn require_admin(&self) -> SeatbookResult<()>;

    /// Checks if the caller owns a resource.
    fn is_owner(&self, resource_owner_id: UserId) -> bool;

    /// Requires the caller to own a resource.
    fn require_owner(&self, resource_owner_id: UserId) -> SeatbookResult<()>;
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: UserRole) -> SeatbookResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(SeatbookError::Forbidden(format!(
                "Required role: {}, your role: {}",
                role, self.role
            )))
        }
    }

    fn require_admin(&self) -> SeatbookResult<()> {
        self.require_role(UserRole::Admin)
    }

    fn is_owner(&self, resource_owner_id: UserId) -> bool {
        self.user_id().is_ok_and(|id| id == resource_owner_id)
    }

    fn require_owner(&self, resource_owner_id: UserId) -> SeatbookResult<()> {
        if self.is_owner(resource_owner_id) {
            Ok(())
        } else {
            Err(SeatbookError::Forbidden(
                "You don't have permission to access this resource".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn claims(user_id: UserId, role: UserRole) -> Claims {
        Claims::new_access(
            user_id,
            "someone".to_string(),
            role,
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() + Duration::hours(1),
        )
    }

    #[test]
    fn test_require_admin() {
        assert!(claims(UserId::new(), UserRole::Admin).require_admin().is_ok());

        match claims(UserId::new(), UserRole::User).require_admin().unwrap_err() {
            SeatbookError::Forbidden(_) => {}
            other => panic!("Expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let claims = claims(owner, UserRole::User);
        assert!(claims.is_owner(owner));
        assert!(claims.require_owner(owner).is_ok());
        assert!(!claims.is_owner(UserId::new()));
        assert!(claims.require_owner(UserId::new()).is_err());
    }

    #[test]
    fn test_admin_is_not_owner_of_others() {
        let claims = claims(UserId::new(), UserRole::Admin);
        assert!(claims.require_owner(UserId::new()).is_err());
    }
}
