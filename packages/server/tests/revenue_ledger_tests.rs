//! Integration tests for the revenue ledger.
//!
//! The ledger is append-only: entries move pending -> completed -> refunded
//! and are never deleted or amended. The report aggregates whatever rows
//! exist at query time.

use rust_decimal_macros::dec;
use server_core::domains::revenue::data::types::RevenueReport;
use server_core::domains::revenue::machines;
use server_core::domains::revenue::models::{EntryStatus, RevenueBreakdownRow};

// =============================================================================
// Entry lifecycle
// =============================================================================

#[test]
fn record_confirm_refund_full_walk() {
    // A banner purchase: 49.99 at 12% commission
    machines::validate_entry("banner", dec!(49.99), dec!(12)).expect("valid entry");
    let commission = machines::commission_amount(dec!(49.99), dec!(12));
    assert_eq!(commission, dec!(5.9988));

    // Payment lands: pending -> completed
    let status = machines::confirm(EntryStatus::Pending).unwrap();
    assert_eq!(status, EntryStatus::Completed);

    // Customer disputes: completed -> refunded, nothing is deleted
    let status = machines::refund(status).unwrap();
    assert_eq!(status, EntryStatus::Refunded);

    // Refunded is terminal on both axes
    assert!(machines::confirm(status).is_err());
    assert!(machines::refund(status).is_err());
}

#[test]
fn refund_requires_a_completed_payment() {
    // A pending entry never received money, so there is nothing to refund
    assert!(machines::refund(EntryStatus::Pending).is_err());
}

#[test]
fn commission_arithmetic_is_exact() {
    // The canonical rounding trap: 99.99 at 10% must be exactly 9.999
    assert_eq!(machines::commission_amount(dec!(99.99), dec!(10)), dec!(9.999));
    // Zero-rate entries (admin placements) carry zero commission
    assert_eq!(machines::commission_amount(dec!(150), dec!(0)), dec!(0));
}

// =============================================================================
// Aggregation report
// =============================================================================

fn row(
    entry_type: &str,
    payment_status: &str,
    total_amount: rust_decimal::Decimal,
    total_commission: rust_decimal::Decimal,
    entry_count: i64,
) -> RevenueBreakdownRow {
    RevenueBreakdownRow {
        entry_type: entry_type.to_string(),
        payment_status: payment_status.to_string(),
        total_amount,
        total_commission,
        entry_count,
    }
}

#[test]
fn report_totals_sum_over_all_groups() {
    let rows = vec![
        row("banner", "completed", dec!(199.98), dec!(19.998), 2),
        row("banner", "pending", dec!(99.99), dec!(9.999), 1),
        row("listing_upsell", "completed", dec!(50.00), dec!(2.50), 2),
        // Refunded rows stay in the ledger and in the report
        row("affiliate", "refunded", dec!(25.00), dec!(0), 1),
    ];

    let report = RevenueReport::from_rows(None, None, rows);
    assert_eq!(report.grand_total_amount, dec!(374.97));
    assert_eq!(report.grand_total_commission, dec!(32.497));
    assert_eq!(report.rows.len(), 4);
}

#[test]
fn empty_ledger_reports_zero() {
    let report = RevenueReport::from_rows(None, None, vec![]);
    assert_eq!(report.grand_total_amount, dec!(0));
    assert_eq!(report.grand_total_commission, dec!(0));
    assert!(report.rows.is_empty());
}

#[test]
fn report_echoes_the_queried_range() {
    let from = "2024-01-01T00:00:00Z".parse().unwrap();
    let to = "2024-02-01T00:00:00Z".parse().unwrap();

    let report = RevenueReport::from_rows(Some(from), Some(to), vec![]);
    assert_eq!(report.from, Some(from));
    assert_eq!(report.to, Some(to));
}
