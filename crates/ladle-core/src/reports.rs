//! # Reports
//!
//! Derived figures for the dashboard and the monthly report. Pure
//! computations over already-loaded orders; the storage layer decides how
//! wide a slice to fetch.
//!
//! Cancelled orders still count as activity but never as revenue.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use ts_rs::TS;

use crate::types::{Order, OrderStatus, OrderType};

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    pub total_orders: i64,
    /// Orders dated today.
    pub today_orders: i64,
    /// Revenue across all non-cancelled orders.
    pub total_revenue_cents: i64,
    /// Distinct companies with an order in the last 30 days.
    pub active_companies: i64,
}

/// One calendar day inside a monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyTotal {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub orders: i64,
    pub revenue_cents: i64,
}

/// Aggregates for a single calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_orders: i64,
    pub total_revenue_cents: i64,
    /// Revenue divided by non-cancelled order count; 0 for an empty month.
    pub average_order_value_cents: i64,
    pub delivery_orders: i64,
    pub pickup_orders: i64,
    pub dine_in_orders: i64,
    /// Ascending by date; days without orders are omitted.
    pub daily: Vec<DailyTotal>,
}

/// Computes the dashboard headline numbers as of `today`.
pub fn dashboard_stats(orders: &[Order], today: NaiveDate) -> DashboardStats {
    let cutoff = today - Duration::days(30);

    let total_orders = orders.len() as i64;
    let today_orders = orders.iter().filter(|o| o.order_date == today).count() as i64;
    let total_revenue_cents = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total_amount_cents)
        .sum();

    let mut recent: Vec<&str> = orders
        .iter()
        .filter(|o| o.order_date > cutoff)
        .map(|o| o.company_id.as_str())
        .collect();
    recent.sort_unstable();
    recent.dedup();

    DashboardStats {
        total_orders,
        today_orders,
        total_revenue_cents,
        active_companies: recent.len() as i64,
    }
}

/// Computes the report for one calendar month. Orders outside the month are
/// ignored, so callers may pass a wider slice than needed.
pub fn monthly_summary(orders: &[Order], year: i32, month: u32) -> MonthlySummary {
    let in_month: Vec<&Order> = orders
        .iter()
        .filter(|o| o.order_date.year() == year && o.order_date.month() == month)
        .collect();

    let total_orders = in_month.len() as i64;
    let billed: Vec<&&Order> = in_month
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .collect();
    let total_revenue_cents: i64 = billed.iter().map(|o| o.total_amount_cents).sum();
    let average_order_value_cents = if billed.is_empty() {
        0
    } else {
        total_revenue_cents / billed.len() as i64
    };

    let count_type = |wanted: OrderType| -> i64 {
        in_month.iter().filter(|o| o.order_type == wanted).count() as i64
    };

    let mut daily: Vec<DailyTotal> = Vec::new();
    let mut by_day: Vec<&Order> = in_month.clone();
    by_day.sort_by_key(|o| o.order_date);
    for order in by_day {
        let revenue = if order.status == OrderStatus::Cancelled {
            0
        } else {
            order.total_amount_cents
        };
        match daily.last_mut() {
            Some(day) if day.date == order.order_date => {
                day.orders += 1;
                day.revenue_cents += revenue;
            }
            _ => daily.push(DailyTotal {
                date: order.order_date,
                orders: 1,
                revenue_cents: revenue,
            }),
        }
    }

    MonthlySummary {
        year,
        month,
        total_orders,
        total_revenue_cents,
        average_order_value_cents,
        delivery_orders: count_type(OrderType::Delivery),
        pickup_orders: count_type(OrderType::Pickup),
        dine_in_orders: count_type(OrderType::DineIn),
        daily,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_order(
        id: &str,
        company_id: &str,
        date: NaiveDate,
        total_cents: i64,
        status: OrderStatus,
        order_type: OrderType,
    ) -> Order {
        Order {
            id: id.to_string(),
            company_id: company_id.to_string(),
            company_name: format!("Company {}", company_id),
            order_date: date,
            items: Vec::new(),
            total_amount_cents: total_cents,
            status,
            order_type,
            delivery_address: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dashboard_counts_and_revenue() {
        let today = day(2025, 3, 14);
        let orders = vec![
            test_order("1", "c1", today, 3000, OrderStatus::Completed, OrderType::Pickup),
            test_order("2", "c1", today, 1300, OrderStatus::Processing, OrderType::Delivery),
            test_order("3", "c2", day(2025, 3, 1), 6250, OrderStatus::Cancelled, OrderType::Pickup),
            test_order("4", "c3", day(2025, 1, 2), 500, OrderStatus::Completed, OrderType::DineIn),
        ];

        let stats = dashboard_stats(&orders, today);

        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.today_orders, 2);
        // Cancelled order 3 contributes nothing
        assert_eq!(stats.total_revenue_cents, 4800);
        // c1 and c2 ordered within 30 days; c3 is too old
        assert_eq!(stats.active_companies, 2);
    }

    #[test]
    fn test_dashboard_empty() {
        let stats = dashboard_stats(&[], day(2025, 3, 14));
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_revenue_cents, 0);
        assert_eq!(stats.active_companies, 0);
    }

    #[test]
    fn test_monthly_summary_filters_and_averages() {
        let orders = vec![
            test_order("1", "c1", day(2025, 3, 2), 3000, OrderStatus::Completed, OrderType::Pickup),
            test_order("2", "c2", day(2025, 3, 2), 1300, OrderStatus::Processing, OrderType::Delivery),
            test_order("3", "c1", day(2025, 3, 20), 6250, OrderStatus::Completed, OrderType::Pickup),
            test_order("4", "c1", day(2025, 3, 9), 9999, OrderStatus::Cancelled, OrderType::DineIn),
            // Different month, must be ignored
            test_order("5", "c1", day(2025, 2, 28), 700, OrderStatus::Completed, OrderType::Pickup),
        ];

        let summary = monthly_summary(&orders, 2025, 3);

        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_revenue_cents, 10550);
        // Average over the three billed orders
        assert_eq!(summary.average_order_value_cents, 3516);
        assert_eq!(summary.delivery_orders, 1);
        assert_eq!(summary.pickup_orders, 2);
        assert_eq!(summary.dine_in_orders, 1);

        assert_eq!(summary.daily.len(), 3);
        assert_eq!(summary.daily[0].date, day(2025, 3, 2));
        assert_eq!(summary.daily[0].orders, 2);
        assert_eq!(summary.daily[0].revenue_cents, 4300);
        // Cancelled day shows the order but no revenue
        assert_eq!(summary.daily[1].date, day(2025, 3, 9));
        assert_eq!(summary.daily[1].revenue_cents, 0);
        assert_eq!(summary.daily[2].date, day(2025, 3, 20));
    }

    #[test]
    fn test_monthly_summary_empty_month() {
        let summary = monthly_summary(&[], 2025, 6);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_order_value_cents, 0);
        assert!(summary.daily.is_empty());
    }
}
