/// Capabilities in the marketplace platform.
///
/// A simplified model: moderation and monetization management are
/// admin-only operations; submission and purchase are open to any
/// authenticated customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCapability {
    /// Approve, reject, flag, repost, or purge listings
    ModerateListings,

    /// Confirm payment, cancel, or sweep placements
    ManagePlacements,

    /// Confirm, refund, or report on revenue entries
    ManageRevenue,
}

impl AdminCapability {
    /// Check if this capability requires admin access
    pub fn requires_admin(&self) -> bool {
        // All capabilities in this system require admin access
        true
    }
}
