//! Listing moderation routes.
//!
//! Handlers stay thin: deserialize, delegate to the listings effects,
//! serialize. Authorization checks live in the effects.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use crate::common::auth::Actor;
use crate::common::{DomainError, ListingId, Page, PageParams};
use crate::domains::listings::data::types::{
    ApproveListingInput, BulkApproveInput, BulkListingInput, BulkOutcome, BulkRejectInput,
    ListingData, MarkHarmfulInput, ModerationResult, PurgeInput, RejectListingInput,
    SubmitListingInput,
};
use crate::domains::listings::effects;
use crate::domains::listings::events::ListingEvent;
use crate::domains::listings::models::{ApprovalStatus, Listing};
use crate::server::app::AppState;

// Pagination fields are inlined rather than flattened: serde_urlencoded
// cannot deserialize numeric fields through #[serde(flatten)].
#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    /// Moderation queue to list; defaults to pending.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn submit_listing(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<SubmitListingInput>,
) -> Result<Json<ModerationResult>, DomainError> {
    let result = effects::submit_listing(actor, input, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn get_listing(
    Path(id): Path<ListingId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<ListingData>, DomainError> {
    let listing = Listing::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(DomainError::NotFound("listing"))?;

    Ok(Json(listing.into()))
}

pub async fn list_listings(
    Query(query): Query<ListingsQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Page<ListingData>>, DomainError> {
    let status: ApprovalStatus = query
        .status
        .as_deref()
        .unwrap_or("pending")
        .parse()
        .map_err(|e| DomainError::Validation(format!("{e}")))?;

    let page = PageParams {
        limit: query.limit,
        offset: query.offset,
    };
    let status_str = status.to_string();
    let limit = page.limit();
    let offset = page.offset();

    let listings = Listing::find_by_status(&status_str, limit, offset, &state.db_pool).await?;
    let total_count = Listing::count_by_status(&status_str, &state.db_pool).await?;

    Ok(Json(Page {
        items: listings.into_iter().map(ListingData::from).collect(),
        total_count,
        limit,
        offset,
    }))
}

pub async fn approve_listing(
    actor: Actor,
    Path(id): Path<ListingId>,
    Extension(state): Extension<AppState>,
    Json(input): Json<ApproveListingInput>,
) -> Result<Json<ModerationResult>, DomainError> {
    let result = effects::approve_listing(actor, id, input.post_type, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn reject_listing(
    actor: Actor,
    Path(id): Path<ListingId>,
    Extension(state): Extension<AppState>,
    Json(input): Json<RejectListingInput>,
) -> Result<Json<ModerationResult>, DomainError> {
    let result = effects::reject_listing(actor, id, input.reason, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn mark_harmful(
    actor: Actor,
    Path(id): Path<ListingId>,
    Extension(state): Extension<AppState>,
    Json(input): Json<MarkHarmfulInput>,
) -> Result<Json<ModerationResult>, DomainError> {
    let result = effects::mark_listing_harmful(actor, id, input.reason, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn repost_listing(
    actor: Actor,
    Path(id): Path<ListingId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<ModerationResult>, DomainError> {
    let result = effects::repost_listing(actor, id, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn delete_listing(
    actor: Actor,
    Path(id): Path<ListingId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<ListingEvent>, DomainError> {
    let event = effects::delete_listing(actor, id, &state.db_pool).await?;
    Ok(Json(event))
}

pub async fn purge_listings(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<PurgeInput>,
) -> Result<Json<ListingEvent>, DomainError> {
    let age_days = input.age_days.unwrap_or(state.listing_purge_age_days);
    let event = effects::purge_old_listings(actor, age_days, &state.db_pool).await?;
    Ok(Json(event))
}

// ============================================================================
// Bulk moderation
// ============================================================================

pub async fn bulk_approve(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<BulkApproveInput>,
) -> Result<Json<Vec<BulkOutcome>>, DomainError> {
    let outcomes =
        effects::bulk_approve(actor, input.listing_ids, input.post_type, &state.db_pool).await?;
    Ok(Json(outcomes))
}

pub async fn bulk_reject(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<BulkRejectInput>,
) -> Result<Json<Vec<BulkOutcome>>, DomainError> {
    let outcomes =
        effects::bulk_reject(actor, input.listing_ids, input.reason, &state.db_pool).await?;
    Ok(Json(outcomes))
}

pub async fn bulk_mark_harmful(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<BulkListingInput>,
) -> Result<Json<Vec<BulkOutcome>>, DomainError> {
    let reason = input.reason.ok_or_else(|| {
        DomainError::Validation("reason is required for the harmful action".to_string())
    })?;
    let outcomes =
        effects::bulk_mark_harmful(actor, input.listing_ids, reason, &state.db_pool).await?;
    Ok(Json(outcomes))
}

pub async fn bulk_repost(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<BulkListingInput>,
) -> Result<Json<Vec<BulkOutcome>>, DomainError> {
    let outcomes = effects::bulk_repost(actor, input.listing_ids, &state.db_pool).await?;
    Ok(Json(outcomes))
}

pub async fn bulk_delete(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<BulkListingInput>,
) -> Result<Json<Vec<BulkOutcome>>, DomainError> {
    let outcomes = effects::bulk_delete(actor, input.listing_ids, &state.db_pool).await?;
    Ok(Json(outcomes))
}
