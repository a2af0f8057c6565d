//! Placement lifecycle events, returned by effects as transition outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{CustomerId, PlacementId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacementEvent {
    PlacementPurchased {
        placement_id: PlacementId,
        customer_id: CustomerId,
    },

    PlacementActivated {
        placement_id: PlacementId,
        transaction_id: String,
        starts_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },

    /// Second payment confirmation on an already-paid placement.
    PaymentAlreadyConfirmed {
        placement_id: PlacementId,
    },

    PlacementExpired {
        placement_id: PlacementId,
    },

    PlacementCancelled {
        placement_id: PlacementId,
    },

    /// Result of an expiry sweep run.
    PlacementsSwept {
        expired_count: u64,
    },
}
