//! Wire DTOs for the listings REST surface.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{CustomerId, ListingId};
use crate::domains::listings::events::ListingEvent;
use crate::domains::listings::models::{Listing, PostType};

/// Input for submitting a new listing
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitListingInput {
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
}

/// Input for approving a pending listing
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveListingInput {
    pub post_type: PostType,
}

/// Input for rejecting a pending listing
#[derive(Debug, Clone, Deserialize)]
pub struct RejectListingInput {
    pub reason: String,
}

/// Input for flagging a listing as harmful
#[derive(Debug, Clone, Deserialize)]
pub struct MarkHarmfulInput {
    pub reason: String,
}

/// Input for the age-threshold purge
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeInput {
    /// Defaults to the configured threshold (21 days) when omitted.
    pub age_days: Option<i64>,
}

/// Bulk moderation over a selected set (approve)
#[derive(Debug, Clone, Deserialize)]
pub struct BulkApproveInput {
    pub listing_ids: Vec<ListingId>,
    pub post_type: PostType,
}

/// Bulk moderation over a selected set (reject)
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRejectInput {
    pub listing_ids: Vec<ListingId>,
    pub reason: String,
}

/// Bulk moderation over a selected set (harmful / repost / delete)
#[derive(Debug, Clone, Deserialize)]
pub struct BulkListingInput {
    pub listing_ids: Vec<ListingId>,
    /// Required for the harmful action, ignored otherwise.
    pub reason: Option<String>,
}

/// Per-item outcome of a bulk action. Items are independent: a failure
/// here never rolls back the others.
#[derive(Debug, Clone, Serialize)]
pub struct BulkOutcome {
    pub listing_id: ListingId,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkOutcome {
    pub fn ok(listing_id: ListingId) -> Self {
        Self {
            listing_id,
            ok: true,
            error: None,
        }
    }

    pub fn failed(listing_id: ListingId, error: impl std::fmt::Display) -> Self {
        Self {
            listing_id,
            ok: false,
            error: Some(error.to_string()),
        }
    }
}

/// Listing snapshot returned from every operation
#[derive(Debug, Clone, Serialize)]
pub struct ListingData {
    pub id: ListingId,
    pub customer_id: CustomerId,
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub approval_status: String,
    pub is_harmful: bool,
    pub post_type: String,
    pub approved_by: Option<CustomerId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub moderation_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_reposted_at: Option<DateTime<Utc>>,
}

impl From<Listing> for ListingData {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            customer_id: listing.customer_id,
            category: listing.category,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            approval_status: listing.approval_status,
            is_harmful: listing.is_harmful,
            post_type: listing.post_type,
            approved_by: listing.approved_by,
            approved_at: listing.approved_at,
            rejection_reason: listing.rejection_reason,
            moderation_notes: listing.moderation_notes,
            created_at: listing.created_at,
            last_reposted_at: listing.last_reposted_at,
        }
    }
}

/// Outcome of a single moderation operation: the transition event plus the
/// resulting listing snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationResult {
    pub event: ListingEvent,
    pub listing: ListingData,
}
