//! Draft handlers
//!
//! The order composer. Each session owns one draft; every edit endpoint
//! mutates it under the store lock and responds with the full recomputed
//! draft, so the client never derives totals itself.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Draft Lifecycle                                    │
//! │                                                                         │
//! │   login ──► GET /draft        (fresh: one item, one 1 × 1 pack)        │
//! │               │                                                         │
//! │               ▼                                                         │
//! │   PUT /draft/company, POST /draft/items, PUT .../packs/:pack_id ...    │
//! │               │                        each returns the whole draft     │
//! │               ▼                                                         │
//! │   POST /draft/submit ──► validate ──► INSERT ──► clear draft           │
//! │               │                          │                              │
//! │               └── failure: draft kept ◄──┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use ladle_core::{CoreError, Order, OrderDraft, OrderType};
use ladle_db::repository::order::generate_order_id;

use crate::error::ApiError;
use crate::middleware::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCompanyPayload {
    pub company_id: String,
}

/// Partial update of the draft's order-level fields. Absent fields are left
/// alone.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMetaPayload {
    pub order_date: Option<NaiveDate>,
    pub order_type: Option<OrderType>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameItemPayload {
    pub name: String,
}

/// Partial update of a pack's quantities. Absent fields are left alone.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackPayload {
    pub pack_count: Option<i64>,
    pub items_per_pack: Option<i64>,
}

/// GET /api/v1/draft
pub async fn get_draft(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<OrderDraft> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.clone()
        });

    Json(draft)
}

/// DELETE /api/v1/draft
///
/// Discards the session's draft and responds with the fresh one that
/// replaces it.
pub async fn reset_draft(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<OrderDraft> {
    debug!(session = %session.session_id, "reset_draft");

    state.drafts.remove(&session.session_id);

    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.clone()
        });

    Json(draft)
}

/// PUT /api/v1/draft/company
///
/// Selects the company and reprices the whole draft at its per-item price.
pub async fn select_draft_company(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<SelectCompanyPayload>,
) -> Result<Json<OrderDraft>, ApiError> {
    debug!(company_id = %payload.company_id, "select_draft_company");

    let company = state
        .db
        .companies()
        .get_by_id(&payload.company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company", &payload.company_id))?;

    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.select_company(&company)?;
            Ok::<_, CoreError>(draft.clone())
        })?;

    Ok(Json(draft))
}

/// PUT /api/v1/draft/meta
pub async fn update_draft_meta(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<DraftMetaPayload>,
) -> Json<OrderDraft> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            if let Some(order_date) = payload.order_date {
                draft.set_order_date(order_date);
            }
            if let Some(order_type) = payload.order_type {
                draft.set_order_type(order_type);
            }
            if let Some(address) = payload.delivery_address.as_deref() {
                draft.set_delivery_address(address);
            }
            if let Some(notes) = payload.notes.as_deref() {
                draft.set_notes(notes);
            }
            draft.clone()
        });

    Json(draft)
}

/// POST /api/v1/draft/items
pub async fn add_draft_item(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<OrderDraft>, ApiError> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.add_item()?;
            Ok::<_, CoreError>(draft.clone())
        })?;

    Ok(Json(draft))
}

/// DELETE /api/v1/draft/items/:item_id
///
/// Removing the last remaining item is a no-op rather than an error.
pub async fn remove_draft_item(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(item_id): Path<i64>,
) -> Result<Json<OrderDraft>, ApiError> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.remove_item(item_id)?;
            Ok::<_, CoreError>(draft.clone())
        })?;

    Ok(Json(draft))
}

/// PUT /api/v1/draft/items/:item_id/name
pub async fn rename_draft_item(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(item_id): Path<i64>,
    Json(payload): Json<RenameItemPayload>,
) -> Json<OrderDraft> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.rename_item(item_id, &payload.name);
            draft.clone()
        });

    Json(draft)
}

/// POST /api/v1/draft/items/:item_id/packs
pub async fn add_draft_pack(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(item_id): Path<i64>,
) -> Result<Json<OrderDraft>, ApiError> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.add_pack(item_id)?;
            Ok::<_, CoreError>(draft.clone())
        })?;

    Ok(Json(draft))
}

/// PUT /api/v1/draft/items/:item_id/packs/:pack_id
///
/// Quantities below 1 are ignored field by field; the previous value stays.
pub async fn update_draft_pack(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path((item_id, pack_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdatePackPayload>,
) -> Result<Json<OrderDraft>, ApiError> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.update_pack(item_id, pack_id, payload.pack_count, payload.items_per_pack)?;
            Ok::<_, CoreError>(draft.clone())
        })?;

    Ok(Json(draft))
}

/// DELETE /api/v1/draft/items/:item_id/packs/:pack_id
///
/// Removing an item's last pack is a no-op rather than an error.
pub async fn remove_draft_pack(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path((item_id, pack_id)): Path<(i64, i64)>,
) -> Result<Json<OrderDraft>, ApiError> {
    let draft = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.remove_pack(item_id, pack_id)?;
            Ok::<_, CoreError>(draft.clone())
        })?;

    Ok(Json(draft))
}

/// POST /api/v1/draft/submit
///
/// Validates the draft, persists it as an order, and only then clears the
/// draft. Validation and persistence failures both leave the draft exactly
/// as it was.
pub async fn submit_draft(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    debug!(session = %session.session_id, "submit_draft");

    let snapshot = state
        .drafts
        .with_draft(&session.session_id, session.expires_at, |draft| {
            draft.clone()
        });

    let order = snapshot.to_order(&generate_order_id(), Utc::now())?;
    let created = state.db.orders().insert(&order).await?;

    state.drafts.remove(&session.session_id);

    info!(
        id = %created.id,
        company = %created.company_name,
        total_cents = created.total_amount_cents,
        "Order submitted"
    );

    Ok((StatusCode::CREATED, Json(created)))
}
