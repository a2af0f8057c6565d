use anyhow::Result as AnyResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{CustomerId, PlacementId};

/// MonetizedPlacement - a paid, time-bounded enhancement attached to a
/// listing, a profile, or a site-wide slot.
///
/// Generalizes banners, affiliate slots, and listing/profile upsells.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Placement {
    pub id: PlacementId,
    pub customer_id: CustomerId,

    pub kind: String, // 'banner', 'affiliate', 'listing_upsell', 'profile_upsell'

    // Target entity (exactly one; null target_id means a site-wide slot)
    pub target_kind: String, // 'listing', 'profile', 'site'
    pub target_id: Option<Uuid>,

    // Monetization window
    pub price: Decimal,
    pub payment_status: String, // 'pending', 'paid', 'failed', 'refunded'
    pub status: String,         // 'pending', 'active', 'expired', 'cancelled'
    pub duration_days: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Enums for type-safe transitions
// =============================================================================

/// Placement kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Banner,
    Affiliate,
    ListingUpsell,
    ProfileUpsell,
}

impl std::fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementKind::Banner => write!(f, "banner"),
            PlacementKind::Affiliate => write!(f, "affiliate"),
            PlacementKind::ListingUpsell => write!(f, "listing_upsell"),
            PlacementKind::ProfileUpsell => write!(f, "profile_upsell"),
        }
    }
}

impl std::str::FromStr for PlacementKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "banner" => Ok(PlacementKind::Banner),
            "affiliate" => Ok(PlacementKind::Affiliate),
            "listing_upsell" => Ok(PlacementKind::ListingUpsell),
            "profile_upsell" => Ok(PlacementKind::ProfileUpsell),
            _ => Err(anyhow::anyhow!("Invalid placement kind: {}", s)),
        }
    }
}

/// Target kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Listing,
    Profile,
    Site,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Listing => write!(f, "listing"),
            TargetKind::Profile => write!(f, "profile"),
            TargetKind::Site => write!(f, "site"),
        }
    }
}

impl std::str::FromStr for TargetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "listing" => Ok(TargetKind::Listing),
            "profile" => Ok(TargetKind::Profile),
            "site" => Ok(TargetKind::Site),
            _ => Err(anyhow::anyhow!("Invalid target kind: {}", s)),
        }
    }
}

/// Payment status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(anyhow::anyhow!("Invalid payment status: {}", s)),
        }
    }
}

/// Placement status enum
///
/// `pending` covers the purchased-but-unpaid window; `expired` and
/// `cancelled` are terminal - a placement is never reactivated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    Pending,
    Active,
    Expired,
    Cancelled,
}

impl std::fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementStatus::Pending => write!(f, "pending"),
            PlacementStatus::Active => write!(f, "active"),
            PlacementStatus::Expired => write!(f, "expired"),
            PlacementStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for PlacementStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "pending" => Ok(PlacementStatus::Pending),
            "active" => Ok(PlacementStatus::Active),
            "expired" => Ok(PlacementStatus::Expired),
            "cancelled" => Ok(PlacementStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid placement status: {}", s)),
        }
    }
}

impl Placement {
    /// Current placement status as the typed enum.
    pub fn placement_status(&self) -> PlacementStatus {
        self.status.parse().unwrap_or(PlacementStatus::Pending)
    }

    /// Current payment status as the typed enum.
    pub fn payment(&self) -> PaymentStatus {
        self.payment_status.parse().unwrap_or(PaymentStatus::Pending)
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Placement {
    /// Create a new placement (pending payment, not yet active)
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        customer_id: CustomerId,
        kind: &str,
        target_kind: &str,
        target_id: Option<Uuid>,
        price: Decimal,
        duration_days: i32,
        starts_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Placement>(
            r#"
            INSERT INTO placements (
                id, customer_id, kind, target_kind, target_id,
                price, duration_days, starts_at, expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(PlacementId::new())
        .bind(customer_id)
        .bind(kind)
        .bind(target_kind)
        .bind(target_id)
        .bind(price)
        .bind(duration_days)
        .bind(starts_at)
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    /// Find placement by ID
    pub async fn find_by_id(id: PlacementId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Placement>("SELECT * FROM placements WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find placements by status
    pub async fn find_by_status(
        status: &str,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Placement>(
            "SELECT * FROM placements
             WHERE status = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Count placements by status (for pagination)
    pub async fn count_by_status(status: &str, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM placements WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Confirm payment and activate the placement.
    ///
    /// Guarded on the pending payment status: a concurrent confirmation
    /// yields no row here, which the effect treats as the idempotent no-op.
    pub async fn apply_payment(
        id: PlacementId,
        transaction_id: &str,
        starts_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Placement>(
            r#"
            UPDATE placements
            SET payment_status = 'paid',
                status = 'active',
                transaction_id = $2,
                starts_at = $3,
                expires_at = $4,
                updated_at = NOW()
            WHERE id = $1 AND payment_status = 'pending' AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .bind(starts_at)
        .bind(expires_at)
        .fetch_optional(pool)
        .await
    }

    /// Transition an active placement whose window has elapsed to expired.
    pub async fn apply_expiry(id: PlacementId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Placement>(
            r#"
            UPDATE placements
            SET status = 'expired', updated_at = NOW()
            WHERE id = $1 AND status = 'active' AND expires_at <= NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Expire every active placement whose window has elapsed.
    ///
    /// Idempotent, safe to run concurrently with reads and with itself.
    pub async fn sweep_expired(pool: &PgPool) -> Result<Vec<PlacementId>, sqlx::Error> {
        sqlx::query_scalar::<_, PlacementId>(
            r#"
            UPDATE placements
            SET status = 'expired', updated_at = NOW()
            WHERE status = 'active' AND expires_at <= NOW()
            RETURNING id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Count active placements whose window has elapsed (sweep preview).
    pub async fn count_due_for_expiry(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM placements WHERE status = 'active' AND expires_at <= NOW()",
        )
        .fetch_one(pool)
        .await
    }

    /// Cancel a placement that has not yet expired.
    pub async fn apply_cancel(id: PlacementId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Placement>(
            r#"
            UPDATE placements
            SET status = 'cancelled', updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'active')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
