//! Wire DTOs for the placements REST surface.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{CustomerId, PlacementId};
use crate::domains::placements::events::PlacementEvent;
use crate::domains::placements::models::{Placement, PlacementKind, TargetKind};

/// Input for purchasing a placement
#[derive(Debug, Clone, Deserialize)]
pub struct PurchasePlacementInput {
    pub kind: PlacementKind,
    pub target_kind: TargetKind,
    /// Required for listing/profile targets, absent for site-wide slots.
    pub target_id: Option<Uuid>,
    pub price: Decimal,
    pub duration_days: i32,
    /// When omitted, the window starts at payment confirmation.
    pub starts_at: Option<DateTime<Utc>>,
    /// When omitted, derived as starts_at + duration_days.
    pub expires_at: Option<DateTime<Utc>>,
    /// Commission percentage applied to the ledger entry for this purchase.
    pub commission_rate: Option<Decimal>,
    pub payment_method: Option<String>,
}

/// Input for confirming payment on a placement
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentInput {
    pub transaction_id: String,
}

/// Query parameters for the activity check
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityQuery {
    /// Point in time to evaluate; defaults to now.
    pub at: Option<DateTime<Utc>>,
}

/// Placement snapshot returned from every operation
#[derive(Debug, Clone, Serialize)]
pub struct PlacementData {
    pub id: PlacementId,
    pub customer_id: CustomerId,
    pub kind: String,
    pub target_kind: String,
    pub target_id: Option<Uuid>,
    pub price: Decimal,
    pub payment_status: String,
    pub status: String,
    pub duration_days: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Placement> for PlacementData {
    fn from(placement: Placement) -> Self {
        Self {
            id: placement.id,
            customer_id: placement.customer_id,
            kind: placement.kind,
            target_kind: placement.target_kind,
            target_id: placement.target_id,
            price: placement.price,
            payment_status: placement.payment_status,
            status: placement.status,
            duration_days: placement.duration_days,
            starts_at: placement.starts_at,
            expires_at: placement.expires_at,
            transaction_id: placement.transaction_id,
            created_at: placement.created_at,
        }
    }
}

/// Outcome of a placement operation: the transition event plus the
/// resulting snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementResult {
    pub event: PlacementEvent,
    pub placement: PlacementData,
}

/// Answer to the "is currently active" query.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityData {
    pub placement_id: PlacementId,
    pub active: bool,
    pub checked_at: DateTime<Utc>,
}
