//! Route definitions for the Ladle order service
//!
//! Three access tiers: login is public, order work requires a session, and
//! company/employee management additionally requires the admin role. The
//! health endpoint lives at the application root, outside `/api/v1`.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::middleware::{admin_gate, session_gate};
use crate::state::AppState;

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Auth (login public, session echo and logout gated)
        .nest("/auth", auth_routes(state.clone()))
        // Admin-only management
        .nest("/companies", company_routes(state.clone()))
        .nest("/employees", employee_routes(state.clone()))
        // Session-gated order work
        .nest("/orders", order_routes(state.clone()))
        .nest("/draft", draft_routes(state.clone()))
        .nest("/reports", report_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/session", get(handlers::current_session))
        .route("/logout", post(handlers::logout))
        .route_layer(middleware::from_fn_with_state(state, session_gate))
        // Added after the gate layer, so login stays public
        .route("/login", post(handlers::login))
}

/// Company management routes (admin)
fn company_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_companies).post(handlers::create_company),
        )
        .route(
            "/:company_id",
            get(handlers::get_company)
                .put(handlers::update_company)
                .delete(handlers::delete_company),
        )
        .route("/:company_id/status", put(handlers::set_company_status))
        // The outermost layer runs first: session_gate populates the
        // context admin_gate checks
        .route_layer(middleware::from_fn(admin_gate))
        .route_layer(middleware::from_fn_with_state(state, session_gate))
}

/// Employee management routes (admin)
fn employee_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/:employee_id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route("/:employee_id/status", put(handlers::set_employee_status))
        .route_layer(middleware::from_fn(admin_gate))
        .route_layer(middleware::from_fn_with_state(state, session_gate))
}

/// Order routes (session)
fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders))
        .route(
            "/:order_id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route("/:order_id/status", put(handlers::set_order_status))
        .route_layer(middleware::from_fn_with_state(state, session_gate))
}

/// Draft composer routes (session)
fn draft_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_draft).delete(handlers::reset_draft))
        .route("/company", put(handlers::select_draft_company))
        .route("/meta", put(handlers::update_draft_meta))
        .route("/items", post(handlers::add_draft_item))
        .route("/items/:item_id", delete(handlers::remove_draft_item))
        .route("/items/:item_id/name", put(handlers::rename_draft_item))
        .route("/items/:item_id/packs", post(handlers::add_draft_pack))
        .route(
            "/items/:item_id/packs/:pack_id",
            put(handlers::update_draft_pack).delete(handlers::remove_draft_pack),
        )
        .route("/submit", post(handlers::submit_draft))
        .route_layer(middleware::from_fn_with_state(state, session_gate))
}

/// Report routes (session)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard_report))
        .route("/monthly", get(handlers::monthly_report))
        .route_layer(middleware::from_fn_with_state(state, session_gate))
}
