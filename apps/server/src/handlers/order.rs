//! Order handlers
//!
//! Read and lifecycle operations over submitted orders. Orders are created
//! only through draft submission; nothing here recomputes totals, the stored
//! item tree is served exactly as frozen at submit time.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use ladle_core::{Order, OrderStatus};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: OrderStatus,
}

/// GET /api/v1/orders?search=&status=
///
/// Newest first. The search needle matches the company name or the order id,
/// case-insensitively; both filters combine.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let mut orders = state.db.orders().list().await?;

    if let Some(status) = query.status {
        orders.retain(|order| order.status == status);
    }

    if let Some(needle) = query.search.as_deref() {
        let needle = needle.trim().to_lowercase();
        if !needle.is_empty() {
            debug!(query = %needle, "list_orders search");
            orders.retain(|order| {
                order.company_name.to_lowercase().contains(&needle)
                    || order.id.to_lowercase().contains(&needle)
            });
        }
    }

    Ok(Json(orders))
}

/// GET /api/v1/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .db
        .orders()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", &id))?;

    Ok(Json(order))
}

/// PUT /api/v1/orders/:id/status
pub async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, status = ?payload.status, "set_order_status");

    state.db.orders().set_status(&id, payload.status).await?;

    info!(id = %id, status = ?payload.status, "Order status changed");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/orders/:id
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_order");

    state.db.orders().delete(&id).await?;

    info!(id = %id, "Order deleted");

    Ok(StatusCode::NO_CONTENT)
}
