//! Placement expiry state machine.
//! Pure decision logic - NO IO, only state transitions.
//!
//! A placement is purchased pending payment, activated when payment is
//! confirmed, and transitions to expired when its window elapses - either
//! lazily on read or via the periodic sweep. `expired` and `cancelled` are
//! terminal: a new placement must be purchased.

use chrono::{DateTime, Duration, Utc};

use crate::common::DomainError;
use crate::domains::placements::models::{PaymentStatus, Placement, PlacementStatus};

/// Activation window decided by `mark_paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// True iff the placement is currently effective.
///
/// Pure function of stored fields: `status = active` and
/// `starts_at <= now < expires_at`.
pub fn is_active(placement: &Placement, now: DateTime<Utc>) -> bool {
    if placement.placement_status() != PlacementStatus::Active {
        return false;
    }
    match (placement.starts_at, placement.expires_at) {
        (Some(starts_at), Some(expires_at)) => starts_at <= now && now < expires_at,
        _ => false,
    }
}

/// Expiry timestamp for a placement window.
///
/// When not supplied explicitly at purchase, it is derived as
/// `starts_at + duration_days`. A window that falls outside chrono's
/// representable range is a validation error, not a panic.
pub fn derive_expires_at(
    starts_at: DateTime<Utc>,
    duration_days: i32,
    explicit: Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, DomainError> {
    match explicit {
        Some(expires_at) => Ok(expires_at),
        None => starts_at
            .checked_add_signed(Duration::days(i64::from(duration_days)))
            .ok_or_else(|| {
                DomainError::Validation(
                    "placement window exceeds the supported time range".to_string(),
                )
            }),
    }
}

/// Decide the payment-confirmation transition.
///
/// Returns `Ok(Some(activation))` when the placement should activate,
/// `Ok(None)` when the payment was already confirmed (idempotent no-op),
/// and an error when the placement can no longer accept payment.
pub fn mark_paid(
    placement: &Placement,
    now: DateTime<Utc>,
) -> Result<Option<Activation>, DomainError> {
    match placement.placement_status() {
        PlacementStatus::Cancelled => {
            return Err(DomainError::InvalidStateTransition(
                "cannot confirm payment on a cancelled placement".to_string(),
            ))
        }
        PlacementStatus::Expired => {
            return Err(DomainError::InvalidStateTransition(
                "cannot confirm payment on an expired placement".to_string(),
            ))
        }
        PlacementStatus::Pending | PlacementStatus::Active => {}
    }

    match placement.payment() {
        // Second confirmation is a no-op: the final state is already reached
        PaymentStatus::Paid => Ok(None),
        PaymentStatus::Pending => {
            let starts_at = placement.starts_at.unwrap_or(now);
            let expires_at =
                derive_expires_at(starts_at, placement.duration_days, placement.expires_at)?;
            Ok(Some(Activation {
                starts_at,
                expires_at,
            }))
        }
        other => Err(DomainError::InvalidStateTransition(format!(
            "cannot confirm payment in payment status '{other}'"
        ))),
    }
}

/// Decide whether an explicit expiry is legal right now.
pub fn mark_expired(placement: &Placement, now: DateTime<Utc>) -> Result<(), DomainError> {
    if placement.placement_status() != PlacementStatus::Active {
        return Err(DomainError::InvalidStateTransition(format!(
            "cannot expire a placement in status '{}'",
            placement.status
        )));
    }
    match placement.expires_at {
        Some(expires_at) if expires_at <= now => Ok(()),
        _ => Err(DomainError::InvalidStateTransition(
            "placement window has not elapsed".to_string(),
        )),
    }
}

/// Decide the cancel transition. Terminal states stay terminal.
pub fn cancel(placement: &Placement) -> Result<(), DomainError> {
    match placement.placement_status() {
        PlacementStatus::Pending | PlacementStatus::Active => Ok(()),
        other => Err(DomainError::InvalidStateTransition(format!(
            "cannot cancel a placement in status '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CustomerId, PlacementId};
    use rust_decimal::Decimal;

    fn placement(
        status: &str,
        payment_status: &str,
        starts_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Placement {
        Placement {
            id: PlacementId::new(),
            customer_id: CustomerId::new(),
            kind: "banner".to_string(),
            target_kind: "site".to_string(),
            target_id: None,
            price: Decimal::new(4999, 2),
            payment_status: payment_status.to_string(),
            status: status.to_string(),
            duration_days: 30,
            starts_at,
            expires_at,
            transaction_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn expiry_derivation_from_duration() {
        let starts_at = ts("2024-01-01T00:00:00Z");
        let derived = derive_expires_at(starts_at, 30, None).unwrap();
        assert_eq!(derived, ts("2024-01-31T00:00:00Z"));

        // An explicit expiry wins over the derived one
        let explicit = ts("2024-02-15T00:00:00Z");
        assert_eq!(
            derive_expires_at(starts_at, 30, Some(explicit)).unwrap(),
            explicit
        );
    }

    #[test]
    fn expiry_derivation_rejects_unrepresentable_windows() {
        // A start date near chrono's ceiling plus a huge duration must come
        // back as a validation error, never an arithmetic panic
        let starts_at = ts("+262142-01-01T00:00:00Z");
        assert!(matches!(
            derive_expires_at(starts_at, i32::MAX, None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn is_active_respects_the_window() {
        let p = placement(
            "active",
            "paid",
            Some(ts("2024-01-01T00:00:00Z")),
            Some(ts("2024-01-31T00:00:00Z")),
        );

        assert!(is_active(&p, ts("2024-01-15T00:00:00Z")));
        assert!(is_active(&p, ts("2024-01-01T00:00:00Z"))); // inclusive start
        assert!(!is_active(&p, ts("2024-01-31T00:00:00Z"))); // exclusive end
        assert!(!is_active(&p, ts("2024-02-01T00:00:00Z")));
        assert!(!is_active(&p, ts("2023-12-31T00:00:00Z")));
    }

    #[test]
    fn is_active_requires_active_status() {
        let window = (
            Some(ts("2024-01-01T00:00:00Z")),
            Some(ts("2024-01-31T00:00:00Z")),
        );
        for status in ["pending", "expired", "cancelled"] {
            let p = placement(status, "paid", window.0, window.1);
            assert!(!is_active(&p, ts("2024-01-15T00:00:00Z")));
        }
    }

    #[test]
    fn mark_paid_activates_and_derives_window() {
        let p = placement("pending", "pending", None, None);
        let now = ts("2024-01-01T00:00:00Z");

        let activation = mark_paid(&p, now).unwrap().unwrap();
        assert_eq!(activation.starts_at, now);
        assert_eq!(activation.expires_at, ts("2024-01-31T00:00:00Z"));
    }

    #[test]
    fn mark_paid_twice_is_a_noop() {
        let p = placement(
            "active",
            "paid",
            Some(ts("2024-01-01T00:00:00Z")),
            Some(ts("2024-01-31T00:00:00Z")),
        );
        assert_eq!(mark_paid(&p, Utc::now()).unwrap(), None);
    }

    #[test]
    fn mark_paid_surfaces_unrepresentable_windows_as_errors() {
        let mut p = placement("pending", "pending", Some(ts("+262142-01-01T00:00:00Z")), None);
        p.duration_days = i32::MAX;

        assert!(matches!(
            mark_paid(&p, Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn mark_paid_rejected_on_terminal_placements() {
        for status in ["expired", "cancelled"] {
            let p = placement(status, "pending", None, None);
            assert!(matches!(
                mark_paid(&p, Utc::now()),
                Err(DomainError::InvalidStateTransition(_))
            ));
        }
    }

    #[test]
    fn mark_expired_requires_elapsed_active_window() {
        let now = ts("2024-02-01T00:00:00Z");

        let elapsed = placement(
            "active",
            "paid",
            Some(ts("2024-01-01T00:00:00Z")),
            Some(ts("2024-01-31T00:00:00Z")),
        );
        assert!(mark_expired(&elapsed, now).is_ok());

        let open = placement(
            "active",
            "paid",
            Some(ts("2024-01-01T00:00:00Z")),
            Some(ts("2024-03-01T00:00:00Z")),
        );
        assert!(matches!(
            mark_expired(&open, now),
            Err(DomainError::InvalidStateTransition(_))
        ));

        let cancelled = placement("cancelled", "paid", None, None);
        assert!(matches!(
            mark_expired(&cancelled, now),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn cancel_is_terminal() {
        assert!(cancel(&placement("pending", "pending", None, None)).is_ok());
        assert!(cancel(&placement("active", "paid", None, None)).is_ok());
        assert!(matches!(
            cancel(&placement("expired", "paid", None, None)),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(matches!(
            cancel(&placement("cancelled", "pending", None, None)),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }
}
