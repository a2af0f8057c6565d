//! Authorization primitives.
//!
//! Authentication itself is external: the identity layer in front of this
//! service supplies an authenticated actor id (and admin flag) with every
//! request. This module only answers "may this actor perform that operation".

mod capability;
mod errors;

pub use capability::AdminCapability;
pub use errors::AuthError;

use crate::common::CustomerId;

/// The authenticated actor performing an operation.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub customer_id: CustomerId,
    pub is_admin: bool,
}

impl Actor {
    pub fn new(customer_id: CustomerId, is_admin: bool) -> Self {
        Self {
            customer_id,
            is_admin,
        }
    }

    /// Checks that this actor holds the given capability.
    pub fn require(&self, capability: AdminCapability) -> Result<(), AuthError> {
        if capability.requires_admin() && !self.is_admin {
            return Err(AuthError::PermissionDenied(format!(
                "{capability:?} requires admin access"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_all_capabilities() {
        let actor = Actor::new(CustomerId::new(), true);
        assert!(actor.require(AdminCapability::ModerateListings).is_ok());
        assert!(actor.require(AdminCapability::ManagePlacements).is_ok());
        assert!(actor.require(AdminCapability::ManageRevenue).is_ok());
    }

    #[test]
    fn non_admin_is_denied() {
        let actor = Actor::new(CustomerId::new(), false);
        let err = actor.require(AdminCapability::ModerateListings).unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied(_)));
    }
}
