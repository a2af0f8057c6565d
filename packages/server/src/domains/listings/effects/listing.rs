//! Listing moderation effects.
//!
//! Each effect loads the listing, consults the machine for the transition
//! decision, persists through the model, and returns the transition event
//! plus the resulting snapshot. The status precondition is re-checked in the
//! model's WHERE clause, so a raced transition surfaces here as
//! `InvalidStateTransition` rather than a silent double-apply.

use sqlx::PgPool;
use tracing::info;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{DomainError, ListingId};
use crate::domains::listings::data::types::{BulkOutcome, ModerationResult, SubmitListingInput};
use crate::domains::listings::events::ListingEvent;
use crate::domains::listings::machines;
use crate::domains::listings::models::{Listing, PostType};

/// Create a new listing on behalf of the submitting customer.
pub async fn submit_listing(
    actor: Actor,
    input: SubmitListingInput,
    pool: &PgPool,
) -> Result<ModerationResult, DomainError> {
    if input.title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be empty".into()));
    }
    if input.category.trim().is_empty() {
        return Err(DomainError::Validation("category must not be empty".into()));
    }

    let listing = Listing::create(
        actor.customer_id,
        input.category,
        input.title,
        input.description,
        input.price,
        pool,
    )
    .await?;

    info!(listing_id = %listing.id, customer_id = %actor.customer_id, "Listing submitted");

    Ok(ModerationResult {
        event: ListingEvent::ListingSubmitted {
            listing_id: listing.id,
            customer_id: actor.customer_id,
        },
        listing: listing.into(),
    })
}

/// Approve a pending listing, recording who approved it and the post type.
pub async fn approve_listing(
    actor: Actor,
    listing_id: ListingId,
    post_type: PostType,
    pool: &PgPool,
) -> Result<ModerationResult, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let listing = Listing::find_by_id(listing_id, pool)
        .await?
        .ok_or(DomainError::NotFound("listing"))?;

    machines::approve(listing.status())?;

    let updated = Listing::apply_approval(listing_id, actor.customer_id, &post_type.to_string(), pool)
        .await?
        .ok_or_else(|| {
            DomainError::InvalidStateTransition("listing is no longer pending".to_string())
        })?;

    info!(listing_id = %listing_id, moderator = %actor.customer_id, "Listing approved");

    Ok(ModerationResult {
        event: ListingEvent::ListingApproved {
            listing_id,
            approved_by: actor.customer_id,
            post_type,
        },
        listing: updated.into(),
    })
}

/// Reject a pending listing with a non-empty reason.
pub async fn reject_listing(
    actor: Actor,
    listing_id: ListingId,
    reason: String,
    pool: &PgPool,
) -> Result<ModerationResult, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let listing = Listing::find_by_id(listing_id, pool)
        .await?
        .ok_or(DomainError::NotFound("listing"))?;

    machines::reject(listing.status(), &reason)?;

    let updated = Listing::apply_rejection(listing_id, &reason, pool)
        .await?
        .ok_or_else(|| {
            DomainError::InvalidStateTransition("listing is no longer pending".to_string())
        })?;

    info!(listing_id = %listing_id, moderator = %actor.customer_id, "Listing rejected");

    Ok(ModerationResult {
        event: ListingEvent::ListingRejected { listing_id, reason },
        listing: updated.into(),
    })
}

/// Flag a listing as harmful, appending the reason to moderation notes.
pub async fn mark_listing_harmful(
    actor: Actor,
    listing_id: ListingId,
    reason: String,
    pool: &PgPool,
) -> Result<ModerationResult, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    machines::mark_harmful(&reason)?;

    let updated = Listing::apply_harmful_flag(listing_id, &reason, pool)
        .await?
        .ok_or(DomainError::NotFound("listing"))?;

    info!(listing_id = %listing_id, moderator = %actor.customer_id, "Listing marked harmful");

    Ok(ModerationResult {
        event: ListingEvent::ListingMarkedHarmful { listing_id },
        listing: updated.into(),
    })
}

/// Repost a moderated listing: back to pending with approval fields cleared.
pub async fn repost_listing(
    actor: Actor,
    listing_id: ListingId,
    pool: &PgPool,
) -> Result<ModerationResult, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let listing = Listing::find_by_id(listing_id, pool)
        .await?
        .ok_or(DomainError::NotFound("listing"))?;

    machines::repost(listing.status())?;

    let updated = Listing::apply_repost(listing_id, pool).await?.ok_or_else(|| {
        DomainError::InvalidStateTransition("listing is not in a terminal state".to_string())
    })?;

    info!(listing_id = %listing_id, moderator = %actor.customer_id, "Listing reposted");

    Ok(ModerationResult {
        event: ListingEvent::ListingReposted { listing_id },
        listing: updated.into(),
    })
}

/// Delete a listing. Bulk-admin action, outside the moderation state machine.
pub async fn delete_listing(
    actor: Actor,
    listing_id: ListingId,
    pool: &PgPool,
) -> Result<ListingEvent, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let deleted = Listing::delete(listing_id, pool).await?;
    if deleted == 0 {
        return Err(DomainError::NotFound("listing"));
    }

    info!(listing_id = %listing_id, moderator = %actor.customer_id, "Listing deleted");

    Ok(ListingEvent::ListingDeleted { listing_id })
}

/// Purge listings older than the age threshold. Irreversible.
pub async fn purge_old_listings(
    actor: Actor,
    age_days: i64,
    pool: &PgPool,
) -> Result<ListingEvent, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    machines::validate_purge_age(age_days)?;

    let deleted_count = Listing::purge_older_than(age_days, pool).await?;

    info!(deleted_count, age_days, "Purged old listings");

    Ok(ListingEvent::ListingsPurged {
        deleted_count,
        age_days,
    })
}

// ============================================================================
// Bulk variants
// ============================================================================
//
// Each applies the single-item operation to every member of the selected
// set. Items are independent: an item in the wrong precondition state is
// skipped (reported as failed), already-applied items are never rolled back.

pub async fn bulk_approve(
    actor: Actor,
    listing_ids: Vec<ListingId>,
    post_type: PostType,
    pool: &PgPool,
) -> Result<Vec<BulkOutcome>, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let mut outcomes = Vec::with_capacity(listing_ids.len());
    for listing_id in listing_ids {
        match approve_listing(actor, listing_id, post_type, pool).await {
            Ok(_) => outcomes.push(BulkOutcome::ok(listing_id)),
            Err(e) => outcomes.push(BulkOutcome::failed(listing_id, e)),
        }
    }
    Ok(outcomes)
}

pub async fn bulk_reject(
    actor: Actor,
    listing_ids: Vec<ListingId>,
    reason: String,
    pool: &PgPool,
) -> Result<Vec<BulkOutcome>, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let mut outcomes = Vec::with_capacity(listing_ids.len());
    for listing_id in listing_ids {
        match reject_listing(actor, listing_id, reason.clone(), pool).await {
            Ok(_) => outcomes.push(BulkOutcome::ok(listing_id)),
            Err(e) => outcomes.push(BulkOutcome::failed(listing_id, e)),
        }
    }
    Ok(outcomes)
}

pub async fn bulk_mark_harmful(
    actor: Actor,
    listing_ids: Vec<ListingId>,
    reason: String,
    pool: &PgPool,
) -> Result<Vec<BulkOutcome>, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let mut outcomes = Vec::with_capacity(listing_ids.len());
    for listing_id in listing_ids {
        match mark_listing_harmful(actor, listing_id, reason.clone(), pool).await {
            Ok(_) => outcomes.push(BulkOutcome::ok(listing_id)),
            Err(e) => outcomes.push(BulkOutcome::failed(listing_id, e)),
        }
    }
    Ok(outcomes)
}

pub async fn bulk_repost(
    actor: Actor,
    listing_ids: Vec<ListingId>,
    pool: &PgPool,
) -> Result<Vec<BulkOutcome>, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let mut outcomes = Vec::with_capacity(listing_ids.len());
    for listing_id in listing_ids {
        match repost_listing(actor, listing_id, pool).await {
            Ok(_) => outcomes.push(BulkOutcome::ok(listing_id)),
            Err(e) => outcomes.push(BulkOutcome::failed(listing_id, e)),
        }
    }
    Ok(outcomes)
}

pub async fn bulk_delete(
    actor: Actor,
    listing_ids: Vec<ListingId>,
    pool: &PgPool,
) -> Result<Vec<BulkOutcome>, DomainError> {
    actor.require(AdminCapability::ModerateListings)?;

    let mut outcomes = Vec::with_capacity(listing_ids.len());
    for listing_id in listing_ids {
        match delete_listing(actor, listing_id, pool).await {
            Ok(_) => outcomes.push(BulkOutcome::ok(listing_id)),
            Err(e) => outcomes.push(BulkOutcome::failed(listing_id, e)),
        }
    }
    Ok(outcomes)
}
