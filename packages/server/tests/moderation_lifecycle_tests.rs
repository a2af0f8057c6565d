//! Integration tests for the listing moderation lifecycle.
//!
//! Walks listings through the full moderation paths and checks the wire
//! shapes the REST layer serves:
//! - pending -> approved -> repost -> pending -> rejected
//! - harmful flag orthogonal to the approval axis
//! - bulk outcome reporting

use server_core::common::{CustomerId, ListingId};
use server_core::domains::listings::data::types::BulkOutcome;
use server_core::domains::listings::events::ListingEvent;
use server_core::domains::listings::machines;
use server_core::domains::listings::models::{ApprovalStatus, PostType};

// =============================================================================
// Lifecycle walks
// =============================================================================

#[test]
fn approve_then_repost_then_reject_walks_the_machine() {
    // A fresh listing starts pending
    let status = ApprovalStatus::Pending;

    // Moderator approves it
    let status = machines::approve(status).expect("pending listing should approve");
    assert_eq!(status, ApprovalStatus::Approved);

    // Seller reposts after the run expires; listing re-enters the queue
    let status = machines::repost(status).expect("approved listing should repost");
    assert_eq!(status, ApprovalStatus::Pending);

    // This time moderation rejects it
    let status = machines::reject(status, "duplicate of an existing ad")
        .expect("pending listing should reject");
    assert_eq!(status, ApprovalStatus::Rejected);

    // A rejected listing can also be reposted for another review round
    let status = machines::repost(status).expect("rejected listing should repost");
    assert_eq!(status, ApprovalStatus::Pending);
}

#[test]
fn terminal_decisions_do_not_stack() {
    let approved = machines::approve(ApprovalStatus::Pending).unwrap();

    // Approving or rejecting an already-moderated listing is refused;
    // the first decision stands until an explicit repost.
    assert!(machines::approve(approved).is_err());
    assert!(machines::reject(approved, "late objection").is_err());
}

#[test]
fn harmful_flag_is_orthogonal_to_approval() {
    // Flagging works no matter where the listing is on the approval axis,
    // so a live scam can be flagged without waiting for a state change.
    assert!(machines::mark_harmful("requests payment off-platform").is_ok());

    let approved = machines::approve(ApprovalStatus::Pending).unwrap();
    assert_eq!(approved, ApprovalStatus::Approved);
    assert!(machines::mark_harmful("reported by three buyers").is_ok());
}

// =============================================================================
// Wire shapes
// =============================================================================

#[test]
fn approval_event_wire_format() {
    let listing_id = ListingId::new();
    let moderator = CustomerId::new();

    let event = ListingEvent::ListingApproved {
        listing_id,
        approved_by: moderator,
        post_type: PostType::Sponsored,
    };

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "listing_approved");
    assert_eq!(json["listing_id"], listing_id.to_string());
    assert_eq!(json["approved_by"], moderator.to_string());
    assert_eq!(json["post_type"], "sponsored");
}

#[test]
fn rejection_event_carries_the_reason() {
    let listing_id = ListingId::new();
    let event = ListingEvent::ListingRejected {
        listing_id,
        reason: "prohibited category".to_string(),
    };

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "listing_rejected");
    assert_eq!(json["reason"], "prohibited category");
}

#[test]
fn purge_event_reports_the_deleted_count() {
    let event = ListingEvent::ListingsPurged {
        deleted_count: 42,
        age_days: 21,
    };

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "listings_purged");
    assert_eq!(json["deleted_count"], 42);
    assert_eq!(json["age_days"], 21);
}

#[test]
fn bulk_outcomes_report_per_item() {
    let succeeded = ListingId::new();
    let failed = ListingId::new();

    let outcomes = vec![
        BulkOutcome::ok(succeeded),
        BulkOutcome::failed(failed, "cannot approve a listing in status 'approved'"),
    ];

    let json = serde_json::to_value(&outcomes).unwrap();
    assert_eq!(json[0]["ok"], true);
    // The ok outcome omits the error field entirely
    assert!(json[0].get("error").is_none());

    assert_eq!(json[1]["ok"], false);
    assert_eq!(
        json[1]["error"],
        "cannot approve a listing in status 'approved'"
    );
    assert_eq!(json[1]["listing_id"], failed.to_string());
}
