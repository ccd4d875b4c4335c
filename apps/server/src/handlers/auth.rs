//! Authentication handlers
//!
//! Login checks the two configured principals (admin and manager) and issues
//! a bearer token. Logout drops the session's draft so a later login with
//! the same credentials starts clean.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ladle_core::EmployeeRole;

use crate::error::ApiError;
use crate::middleware::CurrentSession;
use crate::session::role_label;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub name: String,
    pub role: EmployeeRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub subject: String,
    pub name: String,
    pub role: EmployeeRole,
    /// Unix timestamp after which the session stops validating.
    pub expires_at: i64,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!(email = %payload.email, "login");

    let (principal, role) = state
        .config
        .find_principal(&payload.email)
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if principal.password != payload.password {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = state.sessions.issue(&principal.email, &principal.name, role)?;

    info!(subject = %principal.email, role = role_label(role), "Session opened");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.sessions.lifetime_secs(),
        name: principal.name.clone(),
        role,
    }))
}

/// GET /api/v1/auth/session
pub async fn current_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        subject: session.subject,
        name: session.name,
        role: session.role,
        expires_at: session.expires_at,
    })
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> StatusCode {
    state.drafts.remove(&session.session_id);

    info!(subject = %session.subject, "Session closed");

    StatusCode::NO_CONTENT
}
