//! Listing moderation state machine.
//! Pure decision logic - NO IO, only state transitions.
//!
//! States: `pending` (initial) -> `approved` | `rejected` (terminal on the
//! approval axis). The harmful flag is orthogonal and never changes the
//! approval status. Reposting returns a terminal listing to `pending`.

use crate::common::DomainError;
use crate::domains::listings::models::ApprovalStatus;

/// Upper bound for the purge age threshold (100 years). Far below chrono's
/// duration ceiling, so the cutoff arithmetic cannot overflow.
pub const MAX_PURGE_AGE_DAYS: i64 = 36_500;

/// Approve: only a pending listing can be approved.
pub fn approve(current: ApprovalStatus) -> Result<ApprovalStatus, DomainError> {
    match current {
        ApprovalStatus::Pending => Ok(ApprovalStatus::Approved),
        other => Err(DomainError::InvalidStateTransition(format!(
            "cannot approve a listing in status '{other}'"
        ))),
    }
}

/// Reject: only a pending listing can be rejected, and a reason is required.
pub fn reject(current: ApprovalStatus, reason: &str) -> Result<ApprovalStatus, DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::Validation(
            "rejection reason must not be empty".to_string(),
        ));
    }
    match current {
        ApprovalStatus::Pending => Ok(ApprovalStatus::Rejected),
        other => Err(DomainError::InvalidStateTransition(format!(
            "cannot reject a listing in status '{other}'"
        ))),
    }
}

/// Mark harmful: allowed from any approval state, idempotent.
pub fn mark_harmful(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::Validation(
            "harmful reason must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate the age threshold for a purge.
pub fn validate_purge_age(age_days: i64) -> Result<(), DomainError> {
    if age_days <= 0 {
        return Err(DomainError::Validation(
            "age_days must be positive".to_string(),
        ));
    }
    if age_days > MAX_PURGE_AGE_DAYS {
        return Err(DomainError::Validation(format!(
            "age_days must not exceed {MAX_PURGE_AGE_DAYS}"
        )));
    }
    Ok(())
}

/// Repost: allowed from any terminal approval state, lands back on pending.
pub fn repost(current: ApprovalStatus) -> Result<ApprovalStatus, DomainError> {
    match current {
        ApprovalStatus::Approved | ApprovalStatus::Rejected => Ok(ApprovalStatus::Pending),
        ApprovalStatus::Pending => Err(DomainError::InvalidStateTransition(
            "cannot repost a listing that is still pending".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_requires_pending() {
        assert_eq!(
            approve(ApprovalStatus::Pending).unwrap(),
            ApprovalStatus::Approved
        );
        assert!(matches!(
            approve(ApprovalStatus::Approved),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(matches!(
            approve(ApprovalStatus::Rejected),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn reject_requires_pending_and_reason() {
        assert_eq!(
            reject(ApprovalStatus::Pending, "spam").unwrap(),
            ApprovalStatus::Rejected
        );
        assert!(matches!(
            reject(ApprovalStatus::Pending, "   "),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            reject(ApprovalStatus::Approved, "spam"),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn repost_only_from_terminal_states() {
        assert_eq!(
            repost(ApprovalStatus::Approved).unwrap(),
            ApprovalStatus::Pending
        );
        assert_eq!(
            repost(ApprovalStatus::Rejected).unwrap(),
            ApprovalStatus::Pending
        );
        assert!(matches!(
            repost(ApprovalStatus::Pending),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn purge_age_is_bounded() {
        assert!(validate_purge_age(21).is_ok());
        assert!(validate_purge_age(MAX_PURGE_AGE_DAYS).is_ok());
        assert!(matches!(
            validate_purge_age(0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_purge_age(-3),
            Err(DomainError::Validation(_))
        ));
        // An absurd threshold is refused rather than overflowing the
        // cutoff arithmetic
        assert!(matches!(
            validate_purge_age(999_999_999_999_999),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn harmful_flag_ignores_approval_state() {
        // The flag can be set regardless of where the listing sits on the
        // approval axis, but an empty reason is rejected.
        assert!(mark_harmful("scam contact details").is_ok());
        assert!(matches!(
            mark_harmful(""),
            Err(DomainError::Validation(_))
        ));
    }
}
