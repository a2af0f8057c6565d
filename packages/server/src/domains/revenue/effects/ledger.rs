//! Revenue ledger effects: record, confirm, refund, report.

use sqlx::PgPool;
use tracing::info;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{DomainError, RevenueEntryId};
use crate::domains::revenue::data::types::{LedgerResult, RecordEntryInput, RevenueReport};
use crate::domains::revenue::events::RevenueEvent;
use crate::domains::revenue::machines;
use crate::domains::revenue::models::RevenueEntry;

/// Append a monetization event to the ledger (payment pending).
pub async fn record_entry(
    input: RecordEntryInput,
    pool: &PgPool,
) -> Result<LedgerResult, DomainError> {
    machines::validate_entry(&input.entry_type, input.amount, input.commission_rate)?;

    let commission_amount = machines::commission_amount(input.amount, input.commission_rate);

    let entry = RevenueEntry::create(
        &input.entry_type,
        input.customer_id,
        input.placement_id,
        input.amount,
        input.commission_rate,
        commission_amount,
        input.payment_method,
        pool,
    )
    .await?;

    info!(entry_id = %entry.id, entry_type = %entry.entry_type, amount = %entry.amount, "Revenue entry recorded");

    Ok(LedgerResult {
        event: RevenueEvent::EntryRecorded { entry_id: entry.id },
        entry: entry.into(),
    })
}

/// Record an entry by hand, outside any purchase flow. Admin only.
pub async fn record_entry_manual(
    actor: Actor,
    input: RecordEntryInput,
    pool: &PgPool,
) -> Result<LedgerResult, DomainError> {
    actor.require(AdminCapability::ManageRevenue)?;
    record_entry(input, pool).await
}

/// Confirm a pending entry, stamping payment date and transaction id.
pub async fn confirm_entry(
    actor: Actor,
    entry_id: RevenueEntryId,
    transaction_id: String,
    pool: &PgPool,
) -> Result<LedgerResult, DomainError> {
    actor.require(AdminCapability::ManageRevenue)?;

    if transaction_id.trim().is_empty() {
        return Err(DomainError::Validation(
            "transaction_id must not be empty".to_string(),
        ));
    }

    let entry = RevenueEntry::find_by_id(entry_id, pool)
        .await?
        .ok_or(DomainError::NotFound("revenue entry"))?;

    machines::confirm(entry.status())?;

    let updated = RevenueEntry::apply_confirmation(entry_id, &transaction_id, pool)
        .await?
        .ok_or_else(|| {
            DomainError::InvalidStateTransition("ledger entry is no longer pending".to_string())
        })?;

    info!(entry_id = %entry_id, "Revenue entry confirmed");

    Ok(LedgerResult {
        event: RevenueEvent::EntryConfirmed { entry_id },
        entry: updated.into(),
    })
}

/// Mark a completed entry refunded. The recorded amount stays in place.
pub async fn refund_entry(
    actor: Actor,
    entry_id: RevenueEntryId,
    pool: &PgPool,
) -> Result<LedgerResult, DomainError> {
    actor.require(AdminCapability::ManageRevenue)?;

    let entry = RevenueEntry::find_by_id(entry_id, pool)
        .await?
        .ok_or(DomainError::NotFound("revenue entry"))?;

    machines::refund(entry.status())?;

    let updated = RevenueEntry::apply_refund(entry_id, pool).await?.ok_or_else(|| {
        DomainError::InvalidStateTransition("ledger entry is not completed".to_string())
    })?;

    info!(entry_id = %entry_id, "Revenue entry refunded");

    Ok(LedgerResult {
        event: RevenueEvent::EntryRefunded { entry_id },
        entry: updated.into(),
    })
}

/// Aggregate the ledger by entry type and status over an optional range.
pub async fn report(
    actor: Actor,
    from: Option<chrono::DateTime<chrono::Utc>>,
    to: Option<chrono::DateTime<chrono::Utc>>,
    pool: &PgPool,
) -> Result<RevenueReport, DomainError> {
    actor.require(AdminCapability::ManageRevenue)?;

    if let (Some(from), Some(to)) = (from, to) {
        if from >= to {
            return Err(DomainError::Validation(
                "'from' must be earlier than 'to'".to_string(),
            ));
        }
    }

    let rows = RevenueEntry::breakdown(from, to, pool).await?;
    Ok(RevenueReport::from_rows(from, to, rows))
}
