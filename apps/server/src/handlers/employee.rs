//! Employee handlers
//!
//! Admin-only CRUD over staff records. Validation mirrors the company rules
//! minus pricing: identity fields are required, emails are unique across
//! employees regardless of case.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use ladle_core::validation::{validate_employee, EmployeeFields};
use ladle_core::{Employee, EmployeeRole, RecordStatus};
use ladle_db::repository::employee::generate_employee_id;

use crate::error::ApiError;
use crate::state::AppState;

/// Maximum results returned from a search query.
const SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct EmployeeSearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: EmployeeRole,
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: RecordStatus,
}

/// GET /api/v1/employees?search=
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeSearchQuery>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = match query.search.as_deref() {
        Some(needle) if !needle.trim().is_empty() => {
            debug!(query = %needle, "list_employees search");
            state.db.employees().search(needle, SEARCH_LIMIT).await?
        }
        _ => state.db.employees().list().await?,
    };

    Ok(Json(employees))
}

/// POST /api/v1/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    debug!(name = %payload.name, "create_employee");

    let existing = state.db.employees().email_index().await?;
    validate_employee(
        &EmployeeFields {
            name: &payload.name,
            email: &payload.email,
        },
        &existing,
        None,
    )?;

    let now = Utc::now();
    let employee = Employee {
        id: generate_employee_id(),
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        role: payload.role,
        status: RecordStatus::Active,
        start_date: payload.start_date,
        created_at: now,
        updated_at: now,
    };

    let created = state.db.employees().insert(&employee).await?;

    info!(id = %created.id, name = %created.name, "Employee created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state
        .db
        .employees()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", &id))?;

    Ok(Json(employee))
}

/// PUT /api/v1/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, ApiError> {
    debug!(id = %id, "update_employee");

    let existing = state
        .db
        .employees()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", &id))?;

    let index = state.db.employees().email_index().await?;
    validate_employee(
        &EmployeeFields {
            name: &payload.name,
            email: &payload.email,
        },
        &index,
        Some(&id),
    )?;

    // Identity, status, and creation time survive the edit untouched
    let employee = Employee {
        id: existing.id,
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        role: payload.role,
        status: existing.status,
        start_date: payload.start_date,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    state.db.employees().update(&employee).await?;

    info!(id = %employee.id, "Employee updated");

    Ok(Json(employee))
}

/// PUT /api/v1/employees/:id/status
pub async fn set_employee_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, status = ?payload.status, "set_employee_status");

    state.db.employees().set_status(&id, payload.status).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_employee");

    state.db.employees().delete(&id).await?;

    info!(id = %id, "Employee deleted");

    Ok(StatusCode::NO_CONTENT)
}
