//! Revenue ledger routes.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};

use crate::common::auth::Actor;
use crate::common::{DomainError, RevenueEntryId};
use crate::domains::revenue::data::types::{
    ConfirmEntryInput, LedgerResult, RecordEntryInput, ReportQuery, RevenueEntryData,
    RevenueReport,
};
use crate::domains::revenue::effects;
use crate::domains::revenue::models::RevenueEntry;
use crate::server::app::AppState;

pub async fn record_entry(
    actor: Actor,
    Extension(state): Extension<AppState>,
    Json(input): Json<RecordEntryInput>,
) -> Result<Json<LedgerResult>, DomainError> {
    let result = effects::record_entry_manual(actor, input, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn get_entry(
    Path(id): Path<RevenueEntryId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<RevenueEntryData>, DomainError> {
    let entry = RevenueEntry::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(DomainError::NotFound("revenue entry"))?;

    Ok(Json(entry.into()))
}

pub async fn confirm_entry(
    actor: Actor,
    Path(id): Path<RevenueEntryId>,
    Extension(state): Extension<AppState>,
    Json(input): Json<ConfirmEntryInput>,
) -> Result<Json<LedgerResult>, DomainError> {
    let result = effects::confirm_entry(actor, id, input.transaction_id, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn refund_entry(
    actor: Actor,
    Path(id): Path<RevenueEntryId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<LedgerResult>, DomainError> {
    let result = effects::refund_entry(actor, id, &state.db_pool).await?;
    Ok(Json(result))
}

pub async fn revenue_report(
    actor: Actor,
    Query(query): Query<ReportQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<RevenueReport>, DomainError> {
    let report = effects::report(actor, query.from, query.to, &state.db_pool).await?;
    Ok(Json(report))
}
