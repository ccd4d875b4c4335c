//! Company handlers
//!
//! Admin-only CRUD over client companies. Every write validates through
//! ladle-core first, checking email uniqueness against the full stored
//! index, so a syntactically fine but duplicate email never reaches the
//! database.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use ladle_core::validation::{validate_company, CompanyFields};
use ladle_core::{Company, RecordStatus};
use ladle_db::repository::company::generate_company_id;

use crate::error::ApiError;
use crate::state::AppState;

/// Maximum results returned from a search query.
const SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct CompanySearchQuery {
    pub search: Option<String>,
}

/// Create/update payload. Phone and address are optional contact details;
/// everything else is validated as required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPayload {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub price_per_item_cents: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: RecordStatus,
}

/// GET /api/v1/companies?search=
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanySearchQuery>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = match query.search.as_deref() {
        Some(needle) if !needle.trim().is_empty() => {
            debug!(query = %needle, "list_companies search");
            state.db.companies().search(needle, SEARCH_LIMIT).await?
        }
        _ => state.db.companies().list().await?,
    };

    Ok(Json(companies))
}

/// POST /api/v1/companies
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CompanyPayload>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    debug!(name = %payload.name, "create_company");

    let existing = state.db.companies().email_index().await?;
    validate_company(
        &CompanyFields {
            name: &payload.name,
            contact_person: &payload.contact_person,
            email: &payload.email,
            price_per_item_cents: payload.price_per_item_cents,
        },
        &existing,
        None,
    )?;

    let now = Utc::now();
    let company = Company {
        id: generate_company_id(),
        name: payload.name.trim().to_string(),
        contact_person: payload.contact_person.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        price_per_item_cents: payload.price_per_item_cents,
        status: RecordStatus::Active,
        created_at: now,
        updated_at: now,
    };

    let created = state.db.companies().insert(&company).await?;

    info!(id = %created.id, name = %created.name, "Company created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/companies/:id
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .db
        .companies()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company", &id))?;

    Ok(Json(company))
}

/// PUT /api/v1/companies/:id
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CompanyPayload>,
) -> Result<Json<Company>, ApiError> {
    debug!(id = %id, "update_company");

    let existing = state
        .db
        .companies()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company", &id))?;

    let index = state.db.companies().email_index().await?;
    validate_company(
        &CompanyFields {
            name: &payload.name,
            contact_person: &payload.contact_person,
            email: &payload.email,
            price_per_item_cents: payload.price_per_item_cents,
        },
        &index,
        Some(&id),
    )?;

    // Identity, status, and creation time survive the edit untouched
    let company = Company {
        id: existing.id,
        name: payload.name.trim().to_string(),
        contact_person: payload.contact_person.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        price_per_item_cents: payload.price_per_item_cents,
        status: existing.status,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    state.db.companies().update(&company).await?;

    info!(id = %company.id, "Company updated");

    Ok(Json(company))
}

/// PUT /api/v1/companies/:id/status
pub async fn set_company_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, status = ?payload.status, "set_company_status");

    state.db.companies().set_status(&id, payload.status).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/companies/:id
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_company");

    state.db.companies().delete(&id).await?;

    info!(id = %id, "Company deleted");

    Ok(StatusCode::NO_CONTENT)
}
