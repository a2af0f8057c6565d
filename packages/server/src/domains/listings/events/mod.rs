//! Listing moderation events.
//!
//! Every mutating effect returns one of these as its outcome. Callers (the
//! REST layer, a future notification sender) act on the value; the domain
//! itself sends nothing.

use serde::{Deserialize, Serialize};

use crate::common::{CustomerId, ListingId};
use crate::domains::listings::models::PostType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListingEvent {
    ListingSubmitted {
        listing_id: ListingId,
        customer_id: CustomerId,
    },

    ListingApproved {
        listing_id: ListingId,
        approved_by: CustomerId,
        post_type: PostType,
    },

    /// Carries the reason so the caller can deliver it to the submitter.
    ListingRejected {
        listing_id: ListingId,
        reason: String,
    },

    ListingMarkedHarmful {
        listing_id: ListingId,
    },

    ListingReposted {
        listing_id: ListingId,
    },

    ListingDeleted {
        listing_id: ListingId,
    },

    /// Result of the age-threshold purge.
    ListingsPurged {
        deleted_count: u64,
        age_days: i64,
    },
}
