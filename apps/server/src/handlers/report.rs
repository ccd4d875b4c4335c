//! Report handlers
//!
//! Aggregates are computed in ladle-core over the stored orders; these
//! handlers only fetch and delegate.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use ladle_core::reports::{self, DashboardStats, MonthlySummary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub year: i32,
    pub month: u32,
}

/// GET /api/v1/reports/dashboard
pub async fn dashboard_report(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let orders = state.db.orders().list().await?;
    let stats = reports::dashboard_stats(&orders, Utc::now().date_naive());

    Ok(Json(stats))
}

/// GET /api/v1/reports/monthly?year=&month=
pub async fn monthly_report(
    State(state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlySummary>, ApiError> {
    if !(1..=12).contains(&query.month) {
        return Err(ApiError::validation("Month must be between 1 and 12"));
    }

    debug!(year = query.year, month = query.month, "monthly_report");

    let (from, to) = month_bounds(query.year, query.month)
        .ok_or_else(|| ApiError::validation("Year is out of range"))?;
    let orders = state.db.orders().list_by_date_range(from, to).await?;
    let summary = reports::monthly_summary(&orders, query.year, query.month);

    Ok(Json(summary))
}

/// First and last day of a calendar month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}
