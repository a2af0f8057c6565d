use anyhow::Result as AnyResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CustomerId, PlacementId, RevenueEntryId};

/// RevenueEntry - an immutable record of a monetization event.
///
/// Append-only: after creation only the payment status (confirm/refund),
/// transaction id, and payment date ever change. `placement_id` carries no
/// foreign key - orphaned references are tolerated so historical reports
/// survive placement deletion.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RevenueEntry {
    pub id: RevenueEntryId,
    pub entry_type: String, // e.g. 'job_upsell', 'banner', 'affiliate_conversion'
    pub customer_id: CustomerId,
    pub placement_id: Option<PlacementId>,

    pub amount: Decimal,
    pub commission_rate: Decimal, // percent
    pub commission_amount: Decimal,

    pub payment_status: String, // 'pending', 'completed', 'refunded'
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

/// Ledger entry status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    Completed,
    Refunded,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Pending => write!(f, "pending"),
            EntryStatus::Completed => write!(f, "completed"),
            EntryStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "pending" => Ok(EntryStatus::Pending),
            "completed" => Ok(EntryStatus::Completed),
            "refunded" => Ok(EntryStatus::Refunded),
            _ => Err(anyhow::anyhow!("Invalid entry status: {}", s)),
        }
    }
}

impl RevenueEntry {
    /// Current payment status as the typed enum.
    pub fn status(&self) -> EntryStatus {
        self.payment_status.parse().unwrap_or(EntryStatus::Pending)
    }
}

/// One row of the aggregation report: totals per entry type and status.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevenueBreakdownRow {
    pub entry_type: String,
    pub payment_status: String,
    pub total_amount: Decimal,
    pub total_commission: Decimal,
    pub entry_count: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl RevenueEntry {
    /// Append a new ledger entry (payment pending)
    pub async fn create(
        entry_type: &str,
        customer_id: CustomerId,
        placement_id: Option<PlacementId>,
        amount: Decimal,
        commission_rate: Decimal,
        commission_amount: Decimal,
        payment_method: Option<String>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, RevenueEntry>(
            r#"
            INSERT INTO revenue_entries (
                id, entry_type, customer_id, placement_id,
                amount, commission_rate, commission_amount, payment_method
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(RevenueEntryId::new())
        .bind(entry_type)
        .bind(customer_id)
        .bind(placement_id)
        .bind(amount)
        .bind(commission_rate)
        .bind(commission_amount)
        .bind(payment_method)
        .fetch_one(pool)
        .await
    }

    /// Find entry by ID
    pub async fn find_by_id(
        id: RevenueEntryId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, RevenueEntry>("SELECT * FROM revenue_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Confirm a pending entry, stamping the payment date.
    pub async fn apply_confirmation(
        id: RevenueEntryId,
        transaction_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, RevenueEntry>(
            r#"
            UPDATE revenue_entries
            SET payment_status = 'completed',
                transaction_id = $2,
                payment_date = NOW()
            WHERE id = $1 AND payment_status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .fetch_optional(pool)
        .await
    }

    /// Refund a completed entry. A status annotation only: the original
    /// amount is never reversed or deleted.
    pub async fn apply_refund(
        id: RevenueEntryId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, RevenueEntry>(
            r#"
            UPDATE revenue_entries
            SET payment_status = 'refunded'
            WHERE id = $1 AND payment_status = 'completed'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Totals grouped by entry type and payment status, optionally bounded
    /// by a creation date range. Computed at query time; no caching layer.
    pub async fn breakdown(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        pool: &PgPool,
    ) -> Result<Vec<RevenueBreakdownRow>, sqlx::Error> {
        sqlx::query_as::<_, RevenueBreakdownRow>(
            r#"
            SELECT entry_type,
                   payment_status,
                   COALESCE(SUM(amount), 0) AS total_amount,
                   COALESCE(SUM(commission_amount), 0) AS total_commission,
                   COUNT(*) AS entry_count
            FROM revenue_entries
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            GROUP BY entry_type, payment_status
            ORDER BY entry_type, payment_status
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
