//! Paid placement routes.
//!
//! Purchase also appends the monetization event to the revenue ledger, so
//! every paid slot has a ledger entry from the moment it exists.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::auth::Actor;
use crate::common::{DomainError, PlacementId};
use crate::domains::placements::data::types::{
    ActivityData, ActivityQuery, ConfirmPaymentInput, PlacementData, PlacementResult,
    PurchasePlacementInput,
};
use crate::domains::placements::effects;
use crate::domains::placements::events::PlacementEvent;
use crate::domains::placements::machines;
use crate::domains::revenue;
use crate::domains::revenue::data::types::{RecordEntryInput, RevenueEntryData};
use crate::server::app::AppState;

/// Purchase outcome: the placement plus its ledger entry.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub event: PlacementEvent,
    pub placement: PlacementData,
    pub ledger_entry: RevenueEntryData,
}

pub async fn purchase_placement(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<PurchasePlacementInput>,
) -> Result<Json<PurchaseResponse>, DomainError> {
    let entry_type = input.kind.to_string();
    let amount = input.price;
    let commission_rate = input.commission_rate.unwrap_or(Decimal::ZERO);
    let payment_method = input.payment_method.clone();

    let result = effects::purchase_placement(actor, input, &state.db_pool).await?;

    let ledger = revenue::effects::record_entry(
        RecordEntryInput {
            entry_type,
            customer_id: actor.customer_id,
            placement_id: Some(result.placement.id),
            amount,
            commission_rate,
            payment_method,
        },
        &state.db_pool,
    )
    .await?;

    Ok(Json(PurchaseResponse {
        event: result.event,
        placement: result.placement,
        ledger_entry: ledger.entry,
    }))
}

pub async fn get_placement(
    Path(id): Path<PlacementId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<PlacementData>, DomainError> {
    let placement = effects::get_placement(id, &state.db_pool).await?;
    Ok(Json(placement.into()))
}

/// Is the placement live at the queried instant?
pub async fn placement_activity(
    Path(id): Path<PlacementId>,
    Query(query): Query<ActivityQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<ActivityData>, DomainError> {
    let at = query.at.unwrap_or_else(Utc::now);
    let placement = effects::get_placement(id, &state.db_pool).await?;

    Ok(Json(ActivityData {
        placement_id: id,
        active: machines::is_active(&placement, at),
        checked_at: at,
    }))
}

pub async fn confirm_payment(
    actor: Actor,
    Path(id): Path<PlacementId>,
    Extension(state): Extension<AppState>,
    Json(input): Json<ConfirmPaymentInput>,
) -> Result<Json<PlacementResult>, DomainError> {
    let result = effects::confirm_payment(actor, id, input.transaction_id, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn cancel_placement(
    actor: Actor,
    Path(id): Path<PlacementId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<PlacementResult>, DomainError> {
    let result = effects::cancel_placement(actor, id, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn expire_placement(
    actor: Actor,
    Path(id): Path<PlacementId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<PlacementResult>, DomainError> {
    let result = effects::expire_placement(actor, id, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn sweep_placements(
    actor: Actor,
    Extension(state): Extension<AppState>,
) -> Result<Json<PlacementEvent>, DomainError> {
    let event = effects::sweep_placements(actor, &state.db_pool).await?;
    Ok(Json(event))
}
