//! Integration tests for the paid placement lifecycle.
//!
//! Simulates the purchase -> payment -> active window -> expiry sequence
//! the effects drive, applying each machine decision to the placement the
//! way the guarded SQL updates would.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use server_core::common::{CustomerId, PlacementId};
use server_core::domains::placements::events::PlacementEvent;
use server_core::domains::placements::machines;
use server_core::domains::placements::models::Placement;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn purchased_placement() -> Placement {
    Placement {
        id: PlacementId::new(),
        customer_id: CustomerId::new(),
        kind: "listing_upsell".to_string(),
        target_kind: "listing".to_string(),
        target_id: Some(uuid::Uuid::new_v4()),
        price: Decimal::new(2500, 2), // 25.00
        payment_status: "pending".to_string(),
        status: "pending".to_string(),
        duration_days: 30,
        starts_at: None,
        expires_at: None,
        transaction_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Apply an activation the way `Placement::apply_payment` would.
fn activate(placement: &mut Placement, activation: machines::Activation, txn: &str) {
    placement.payment_status = "paid".to_string();
    placement.status = "active".to_string();
    placement.starts_at = Some(activation.starts_at);
    placement.expires_at = Some(activation.expires_at);
    placement.transaction_id = Some(txn.to_string());
}

#[test]
fn purchase_to_expiry_full_walk() {
    let mut placement = purchased_placement();
    let paid_at = ts("2024-01-01T00:00:00Z");

    // Before payment the placement is never effective
    assert!(!machines::is_active(&placement, paid_at));

    // Payment confirmation opens a 30-day window from the confirmation time
    let activation = machines::mark_paid(&placement, paid_at)
        .expect("pending placement accepts payment")
        .expect("first confirmation activates");
    assert_eq!(activation.starts_at, paid_at);
    assert_eq!(activation.expires_at, ts("2024-01-31T00:00:00Z"));

    activate(&mut placement, activation, "txn_0042");

    // Effective inside the window, inclusive of the first instant
    assert!(machines::is_active(&placement, paid_at));
    assert!(machines::is_active(&placement, ts("2024-01-30T23:59:59Z")));
    // The boundary itself is already outside
    assert!(!machines::is_active(&placement, ts("2024-01-31T00:00:00Z")));

    // The sweep may not expire it early
    assert!(machines::mark_expired(&placement, ts("2024-01-15T00:00:00Z")).is_err());

    // Once elapsed, expiry is legal and the placement goes dark
    assert!(machines::mark_expired(&placement, ts("2024-01-31T00:00:00Z")).is_ok());
    placement.status = "expired".to_string();
    assert!(!machines::is_active(&placement, ts("2024-01-31T00:00:01Z")));

    // Terminal: no further payment or cancellation
    assert!(machines::mark_paid(&placement, Utc::now()).is_err());
    assert!(machines::cancel(&placement).is_err());
}

#[test]
fn scheduled_start_dates_are_honored() {
    let mut placement = purchased_placement();
    placement.starts_at = Some(ts("2024-06-01T00:00:00Z"));
    placement.duration_days = 7;

    // Payment confirmed ahead of the scheduled start
    let activation = machines::mark_paid(&placement, ts("2024-05-20T12:00:00Z"))
        .unwrap()
        .unwrap();
    assert_eq!(activation.starts_at, ts("2024-06-01T00:00:00Z"));
    assert_eq!(activation.expires_at, ts("2024-06-08T00:00:00Z"));

    activate(&mut placement, activation, "txn_0099");

    // Active status alone is not enough before the window opens
    assert!(!machines::is_active(&placement, ts("2024-05-25T00:00:00Z")));
    assert!(machines::is_active(&placement, ts("2024-06-03T00:00:00Z")));
}

#[test]
fn double_payment_confirmation_is_a_noop() {
    let mut placement = purchased_placement();
    let activation = machines::mark_paid(&placement, ts("2024-01-01T00:00:00Z"))
        .unwrap()
        .unwrap();
    activate(&mut placement, activation, "txn_0001");

    // The retry decides "no transition"; the stored window is untouched
    assert_eq!(machines::mark_paid(&placement, Utc::now()).unwrap(), None);
    assert_eq!(placement.transaction_id.as_deref(), Some("txn_0001"));
    assert_eq!(placement.expires_at, Some(ts("2024-01-31T00:00:00Z")));
}

#[test]
fn cancelled_placements_accept_no_payment() {
    let mut placement = purchased_placement();
    assert!(machines::cancel(&placement).is_ok());
    placement.status = "cancelled".to_string();

    assert!(machines::mark_paid(&placement, Utc::now()).is_err());
    assert!(!machines::is_active(&placement, Utc::now()));
}

#[test]
fn sweep_event_wire_format() {
    let event = PlacementEvent::PlacementsSwept { expired_count: 7 };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "placements_swept");
    assert_eq!(json["expired_count"], 7);
}
