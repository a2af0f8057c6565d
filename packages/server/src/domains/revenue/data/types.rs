//! Wire DTOs for the revenue REST surface.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{CustomerId, PlacementId, RevenueEntryId};
use crate::domains::revenue::events::RevenueEvent;
use crate::domains::revenue::models::{RevenueBreakdownRow, RevenueEntry};

/// Input for recording a monetization event
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEntryInput {
    pub entry_type: String,
    pub customer_id: CustomerId,
    pub placement_id: Option<PlacementId>,
    pub amount: Decimal,
    /// Commission percentage (0-100).
    pub commission_rate: Decimal,
    pub payment_method: Option<String>,
}

/// Input for confirming a pending entry
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmEntryInput {
    pub transaction_id: String,
}

/// Query parameters for the aggregation report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Ledger entry snapshot
#[derive(Debug, Clone, Serialize)]
pub struct RevenueEntryData {
    pub id: RevenueEntryId,
    pub entry_type: String,
    pub customer_id: CustomerId,
    pub placement_id: Option<PlacementId>,
    pub amount: Decimal,
    pub commission_rate: Decimal,
    pub commission_amount: Decimal,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<RevenueEntry> for RevenueEntryData {
    fn from(entry: RevenueEntry) -> Self {
        Self {
            id: entry.id,
            entry_type: entry.entry_type,
            customer_id: entry.customer_id,
            placement_id: entry.placement_id,
            amount: entry.amount,
            commission_rate: entry.commission_rate,
            commission_amount: entry.commission_amount,
            payment_status: entry.payment_status,
            payment_method: entry.payment_method,
            transaction_id: entry.transaction_id,
            payment_date: entry.payment_date,
            created_at: entry.created_at,
        }
    }
}

/// Outcome of a ledger operation: the event plus the entry snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerResult {
    pub event: RevenueEvent,
    pub entry: RevenueEntryData,
}

/// Aggregation report over the entry set at query time.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub rows: Vec<RevenueBreakdownRow>,
    pub grand_total_amount: Decimal,
    pub grand_total_commission: Decimal,
}

impl RevenueReport {
    pub fn from_rows(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        rows: Vec<RevenueBreakdownRow>,
    ) -> Self {
        let grand_total_amount = rows.iter().map(|r| r.total_amount).sum();
        let grand_total_commission = rows.iter().map(|r| r.total_commission).sum();
        Self {
            from,
            to,
            rows,
            grand_total_amount,
            grand_total_commission,
        }
    }
}
