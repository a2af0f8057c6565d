//! Revenue ledger rules.
//! Pure decision logic - NO IO.
//!
//! The ledger is informational: it records monetization events and never
//! mutates listing or placement state.

use rust_decimal::Decimal;

use crate::common::DomainError;
use crate::domains::revenue::models::EntryStatus;

/// Commission owed for an amount at a percentage rate.
///
/// Exact decimal arithmetic: `99.99` at `10`% is `9.999`, not a rounded
/// floating-point approximation.
pub fn commission_amount(amount: Decimal, commission_rate: Decimal) -> Decimal {
    amount * commission_rate / Decimal::ONE_HUNDRED
}

/// Validate the fields of a new ledger entry.
pub fn validate_entry(
    entry_type: &str,
    amount: Decimal,
    commission_rate: Decimal,
) -> Result<(), DomainError> {
    if entry_type.trim().is_empty() {
        return Err(DomainError::Validation(
            "entry_type must not be empty".to_string(),
        ));
    }
    if amount.is_sign_negative() {
        return Err(DomainError::Validation(
            "amount must not be negative".to_string(),
        ));
    }
    if commission_rate.is_sign_negative() || commission_rate > Decimal::ONE_HUNDRED {
        return Err(DomainError::Validation(
            "commission_rate must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

/// Confirm: only a pending entry can complete.
pub fn confirm(current: EntryStatus) -> Result<EntryStatus, DomainError> {
    match current {
        EntryStatus::Pending => Ok(EntryStatus::Completed),
        other => Err(DomainError::InvalidStateTransition(format!(
            "cannot confirm a ledger entry in status '{other}'"
        ))),
    }
}

/// Refund: only a completed entry can be refunded. The amount field is
/// untouched - a refund is a status annotation, not a reversal.
pub fn refund(current: EntryStatus) -> Result<EntryStatus, DomainError> {
    match current {
        EntryStatus::Completed => Ok(EntryStatus::Refunded),
        other => Err(DomainError::InvalidStateTransition(format!(
            "cannot refund a ledger entry in status '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn commission_is_exact() {
        assert_eq!(commission_amount(dec!(99.99), dec!(10)), dec!(9.999));
        assert_eq!(commission_amount(dec!(100), dec!(15)), dec!(15));
        assert_eq!(commission_amount(dec!(49.50), dec!(0)), dec!(0));
    }

    #[test]
    fn validation_bounds() {
        assert!(validate_entry("job_upsell", dec!(10), dec!(5)).is_ok());
        assert!(matches!(
            validate_entry("", dec!(10), dec!(5)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_entry("banner", dec!(-1), dec!(5)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_entry("banner", dec!(10), dec!(101)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn confirm_only_from_pending() {
        assert_eq!(confirm(EntryStatus::Pending).unwrap(), EntryStatus::Completed);
        assert!(matches!(
            confirm(EntryStatus::Completed),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(matches!(
            confirm(EntryStatus::Refunded),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn refund_only_from_completed() {
        assert_eq!(refund(EntryStatus::Completed).unwrap(), EntryStatus::Refunded);
        assert!(matches!(
            refund(EntryStatus::Pending),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(matches!(
            refund(EntryStatus::Refunded),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }
}
