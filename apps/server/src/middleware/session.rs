//! Session middleware
//!
//! Validates bearer tokens and gates admin-only routes. Every request behind
//! the gate carries a [`SessionContext`] in its extensions; handlers pull it
//! out with the [`CurrentSession`] extractor.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use ladle_core::EmployeeRole;

use crate::error::ApiError;
use crate::session::{extract_bearer_token, parse_role, Claims};
use crate::state::AppState;

/// Validated session details carried through request extensions.
#[derive(Clone, Debug)]
pub struct SessionContext {
    /// Token id. Unique per login; keys the session's order draft.
    pub session_id: String,
    /// Login email, lowercased.
    pub subject: String,
    /// Display name of the principal.
    pub name: String,
    pub role: EmployeeRole,
    /// Unix timestamp after which the token stops validating.
    pub expires_at: i64,
}

impl SessionContext {
    /// Builds the context from validated claims. `None` when the role label
    /// is not one that can hold a session.
    fn from_claims(claims: &Claims) -> Option<Self> {
        let role = parse_role(&claims.role)?;

        Some(SessionContext {
            session_id: claims.jti.clone(),
            subject: claims.sub.clone(),
            name: claims.name.clone(),
            role,
            expires_at: claims.exp,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == EmployeeRole::Admin
    }
}

/// Middleware that validates the bearer token on every request and stores
/// the resulting [`SessionContext`] in request extensions.
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(extract_bearer_token) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let claims = match state.sessions.validate(token) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    let session = match SessionContext::from_claims(&claims) {
        Some(session) => session,
        None => return unauthorized_response("Session role is not recognized"),
    };

    request.extensions_mut().insert(session);

    next.run(request).await
}

/// Middleware that rejects non-admin sessions.
///
/// Layered after [`session_gate`] so the context is already in the request
/// extensions by the time it runs.
pub async fn admin_gate(request: Request, next: Next) -> Response {
    match request.extensions().get::<SessionContext>() {
        Some(session) if session.is_admin() => next.run(request).await,
        Some(_) => forbidden_response("Admin role required"),
        None => unauthorized_response("Authentication required"),
    }
}

fn unauthorized_response(message: &str) -> Response {
    ApiError::unauthorized(message).into_response()
}

fn forbidden_response(message: &str) -> Response {
    ApiError::forbidden(message).into_response()
}

/// Extractor for the validated session.
/// Use this in handlers behind the session gate.
#[derive(Clone, Debug)]
pub struct CurrentSession(pub SessionContext);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: "pat@ladle.local".to_string(),
            name: "Pat".to_string(),
            role: role.to_string(),
            iat: 1_700_000_000,
            exp: 1_700_028_800,
            jti: "session-1".to_string(),
        }
    }

    #[test]
    fn test_context_from_claims() {
        let ctx = SessionContext::from_claims(&claims("manager")).unwrap();
        assert_eq!(ctx.session_id, "session-1");
        assert_eq!(ctx.subject, "pat@ladle.local");
        assert_eq!(ctx.role, EmployeeRole::Manager);
        assert_eq!(ctx.expires_at, 1_700_028_800);
        assert!(!ctx.is_admin());

        assert!(SessionContext::from_claims(&claims("admin"))
            .unwrap()
            .is_admin());
    }

    #[test]
    fn test_unknown_role_yields_no_context() {
        assert!(SessionContext::from_claims(&claims("staff")).is_none());
        assert!(SessionContext::from_claims(&claims("root")).is_none());
    }
}
