//! Placement lifecycle effects.
//!
//! Payment confirmation and expiry decisions live in the machine; these
//! handlers load the placement, apply the decision through guarded model
//! updates, and return the transition event plus the resulting snapshot.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{DomainError, PlacementId};
use crate::domains::placements::data::types::{PlacementResult, PurchasePlacementInput};
use crate::domains::placements::events::PlacementEvent;
use crate::domains::placements::machines;
use crate::domains::placements::models::{Placement, TargetKind};

/// Purchase a placement: created pending payment, activated on confirmation.
pub async fn purchase_placement(
    actor: Actor,
    input: PurchasePlacementInput,
    pool: &PgPool,
) -> Result<PlacementResult, DomainError> {
    if input.duration_days <= 0 {
        return Err(DomainError::Validation(
            "duration_days must be positive".to_string(),
        ));
    }
    if input.price.is_sign_negative() {
        return Err(DomainError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    // A site-wide slot has no target entity; everything else needs one
    match (input.target_kind, input.target_id) {
        (TargetKind::Site, Some(_)) => {
            return Err(DomainError::Validation(
                "site-wide placements must not carry a target_id".to_string(),
            ))
        }
        (TargetKind::Listing | TargetKind::Profile, None) => {
            return Err(DomainError::Validation(format!(
                "{} placements require a target_id",
                input.target_kind
            )))
        }
        _ => {}
    }

    let placement = Placement::create(
        actor.customer_id,
        &input.kind.to_string(),
        &input.target_kind.to_string(),
        input.target_id,
        input.price,
        input.duration_days,
        input.starts_at,
        input.expires_at,
        pool,
    )
    .await?;

    info!(placement_id = %placement.id, kind = %placement.kind, "Placement purchased");

    Ok(PlacementResult {
        event: PlacementEvent::PlacementPurchased {
            placement_id: placement.id,
            customer_id: actor.customer_id,
        },
        placement: placement.into(),
    })
}

/// Confirm payment: activates the placement and fixes its window.
///
/// Idempotent - confirming an already-paid placement returns the unchanged
/// snapshot with a `PaymentAlreadyConfirmed` event.
pub async fn confirm_payment(
    actor: Actor,
    placement_id: PlacementId,
    transaction_id: String,
    pool: &PgPool,
) -> Result<PlacementResult, DomainError> {
    actor.require(AdminCapability::ManagePlacements)?;

    if transaction_id.trim().is_empty() {
        return Err(DomainError::Validation(
            "transaction_id must not be empty".to_string(),
        ));
    }

    let placement = Placement::find_by_id(placement_id, pool)
        .await?
        .ok_or(DomainError::NotFound("placement"))?;

    let Some(activation) = machines::mark_paid(&placement, Utc::now())? else {
        return Ok(PlacementResult {
            event: PlacementEvent::PaymentAlreadyConfirmed { placement_id },
            placement: placement.into(),
        });
    };

    match Placement::apply_payment(
        placement_id,
        &transaction_id,
        activation.starts_at,
        activation.expires_at,
        pool,
    )
    .await?
    {
        Some(updated) => {
            info!(placement_id = %placement_id, expires_at = %activation.expires_at, "Placement activated");
            Ok(PlacementResult {
                event: PlacementEvent::PlacementActivated {
                    placement_id,
                    transaction_id,
                    starts_at: activation.starts_at,
                    expires_at: activation.expires_at,
                },
                placement: updated.into(),
            })
        }
        // Raced with another confirmation; re-read and report the no-op
        None => {
            let current = Placement::find_by_id(placement_id, pool)
                .await?
                .ok_or(DomainError::NotFound("placement"))?;
            Ok(PlacementResult {
                event: PlacementEvent::PaymentAlreadyConfirmed { placement_id },
                placement: current.into(),
            })
        }
    }
}

/// Load a placement, lazily expiring it when its window has elapsed.
pub async fn get_placement(
    placement_id: PlacementId,
    pool: &PgPool,
) -> Result<Placement, DomainError> {
    let placement = Placement::find_by_id(placement_id, pool)
        .await?
        .ok_or(DomainError::NotFound("placement"))?;

    if machines::mark_expired(&placement, Utc::now()).is_ok() {
        if let Some(expired) = Placement::apply_expiry(placement_id, pool).await? {
            info!(placement_id = %placement_id, "Placement lazily expired on read");
            return Ok(expired);
        }
    }

    Ok(placement)
}

/// Explicitly expire an elapsed active placement.
pub async fn expire_placement(
    actor: Actor,
    placement_id: PlacementId,
    pool: &PgPool,
) -> Result<PlacementResult, DomainError> {
    actor.require(AdminCapability::ManagePlacements)?;

    let placement = Placement::find_by_id(placement_id, pool)
        .await?
        .ok_or(DomainError::NotFound("placement"))?;

    machines::mark_expired(&placement, Utc::now())?;

    let updated = Placement::apply_expiry(placement_id, pool)
        .await?
        .ok_or_else(|| {
            DomainError::InvalidStateTransition("placement is no longer active".to_string())
        })?;

    Ok(PlacementResult {
        event: PlacementEvent::PlacementExpired { placement_id },
        placement: updated.into(),
    })
}

/// Cancel a placement. Terminal; the owner or an admin may cancel.
pub async fn cancel_placement(
    actor: Actor,
    placement_id: PlacementId,
    pool: &PgPool,
) -> Result<PlacementResult, DomainError> {
    let placement = Placement::find_by_id(placement_id, pool)
        .await?
        .ok_or(DomainError::NotFound("placement"))?;

    if placement.customer_id != actor.customer_id {
        actor.require(AdminCapability::ManagePlacements)?;
    }

    machines::cancel(&placement)?;

    let updated = Placement::apply_cancel(placement_id, pool)
        .await?
        .ok_or_else(|| {
            DomainError::InvalidStateTransition("placement is already terminal".to_string())
        })?;

    info!(placement_id = %placement_id, "Placement cancelled");

    Ok(PlacementResult {
        event: PlacementEvent::PlacementCancelled { placement_id },
        placement: updated.into(),
    })
}

/// Expire every active placement whose window has elapsed.
///
/// Shared by the hourly scheduler, the one-shot sweep binary, and the
/// admin sweep route. Idempotent.
pub async fn run_expiry_sweep(pool: &PgPool) -> Result<u64, DomainError> {
    let expired = Placement::sweep_expired(pool).await?;
    let expired_count = expired.len() as u64;

    if expired_count > 0 {
        info!(expired_count, "Expiry sweep transitioned placements");
    }

    Ok(expired_count)
}

/// Admin-triggered sweep returning the outcome as an event.
pub async fn sweep_placements(actor: Actor, pool: &PgPool) -> Result<PlacementEvent, DomainError> {
    actor.require(AdminCapability::ManagePlacements)?;

    let expired_count = run_expiry_sweep(pool).await?;
    Ok(PlacementEvent::PlacementsSwept { expired_count })
}
