//! # Domain Types
//!
//! Core domain types used throughout Ladle.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Company      │   │      Order      │   │    Employee     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  email          │   │  company_id     │   │  email          │       │
//! │  │  price_per_item │   │  items (tree)   │   │  role           │       │
//! │  │  status         │   │  total_amount   │   │  status         │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │                                       │
//! │                        ┌────────┴────────┐                             │
//! │                        │   OrderItem     │  name, totals               │
//! │                        └────────┬────────┘                             │
//! │                                 │                                       │
//! │                        ┌────────┴──────────┐                           │
//! │                        │ PackConfiguration │  N packs × M items        │
//! │                        └───────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Totals
//! `total_items`/`total_price_cents` on packs and items, and
//! `total_amount_cents` on orders, are never set directly. They are produced
//! by the pricing engine ([`crate::pricing`]) rebuilding the tree bottom-up.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Record Status
// =============================================================================

/// Active/inactive flag shared by companies and employees.
///
/// Deactivation is a soft state change, not a delete: inactive records stay
/// listed and can be reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Active
    }
}

// =============================================================================
// Company
// =============================================================================

/// A client company that places orders.
///
/// The per-item price lives here and is captured into an order at submit
/// time; later price edits never touch existing orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Company display name.
    pub name: String,

    /// Primary contact person.
    pub contact_person: String,

    /// Contact email (unique, case-insensitive).
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// Per-item price in cents (smallest currency unit).
    pub price_per_item_cents: i64,

    /// Whether the company is active.
    pub status: RecordStatus,

    /// When the company was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the company was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Returns the per-item price as a Money type.
    #[inline]
    pub fn price_per_item(&self) -> Money {
        Money::from_cents(self.price_per_item_cents)
    }
}

// =============================================================================
// Employee
// =============================================================================

/// Access role of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Full access, including company and employee management.
    Admin,
    /// Order and report access.
    Manager,
    /// Listed for scheduling only; no system login.
    Staff,
}

/// A staff member of the business.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Contact email (unique, case-insensitive).
    pub email: String,
    pub phone: String,
    pub role: EmployeeRole,
    pub status: RecordStatus,
    /// First day of employment.
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order accepted and being prepared. Every new order starts here.
    Processing,
    /// Order fulfilled.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// How the order is fulfilled.
///
/// `Delivery` requires a delivery address (enforced by validation at submit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "kebab-case"))]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    Delivery,
    Pickup,
    DineIn,
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::Pickup
    }
}

// =============================================================================
// Pack Configuration
// =============================================================================

/// A quantity grouping inside an order item: N packs of M items each.
///
/// `total_items` and `total_price_cents` are derived by the pricing engine;
/// they always satisfy `total_items == pack_count * items_per_pack` and
/// `total_price_cents == total_items * unit_price_cents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackConfiguration {
    /// Identifier unique within the parent item (small sequential integer).
    pub id: i64,
    /// Number of packs. Always ≥ 1.
    pub pack_count: i64,
    /// Items per pack. Always ≥ 1.
    pub items_per_pack: i64,
    /// Derived: pack_count × items_per_pack.
    pub total_items: i64,
    /// Derived: total_items × unit price.
    pub total_price_cents: i64,
}

impl PackConfiguration {
    /// Returns the pack total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A named line in an order, composed of one or more pack configurations.
///
/// `total_items`/`total_price_cents` are the sums of the pack totals, derived
/// by the pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Identifier unique within the parent order (small sequential integer).
    pub id: i64,
    /// Item name as entered by the user. Non-empty once submitted.
    pub name: String,
    /// The item's pack configurations. Never empty.
    pub packs: Vec<PackConfiguration>,
    /// Derived: sum of pack total_items.
    pub total_items: i64,
    /// Derived: sum of pack totals.
    pub total_price_cents: i64,
}

impl OrderItem {
    /// Returns the item total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted order.
///
/// The unit price is frozen into the item tree at submit time: the stored
/// totals never change when the company later changes its price. `items`
/// persists as one opaque JSON value; only the order-level columns are
/// queried relationally.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Company the order was placed for.
    pub company_id: String,
    /// Company name snapshot at submit time.
    pub company_name: String,
    /// The date the order is for (not the creation timestamp).
    #[ts(as = "String")]
    pub order_date: NaiveDate,
    /// The item tree with frozen totals. Never empty.
    pub items: Vec<OrderItem>,
    /// Derived: sum of item totals.
    pub total_amount_cents: i64,
    pub status: OrderStatus,
    pub order_type: OrderType,
    /// Present iff order_type is Delivery.
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        let status = OrderStatus::default();
        assert_eq!(status, OrderStatus::Processing);
    }

    #[test]
    fn test_record_status_default() {
        let status = RecordStatus::default();
        assert_eq!(status, RecordStatus::Active);
    }

    #[test]
    fn test_order_type_wire_format() {
        // The hyphenated form is the persisted/API string
        assert_eq!(
            serde_json::to_string(&OrderType::DineIn).unwrap(),
            "\"dine-in\""
        );
        assert_eq!(
            serde_json::to_string(&OrderType::Delivery).unwrap(),
            "\"delivery\""
        );
        let parsed: OrderType = serde_json::from_str("\"dine-in\"").unwrap();
        assert_eq!(parsed, OrderType::DineIn);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(
            serde_json::to_string(&RecordStatus::Inactive).unwrap(),
            "\"inactive\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeRole::Manager).unwrap(),
            "\"manager\""
        );
    }

    #[test]
    fn test_company_price_helper() {
        let company = Company {
            id: "c-1".to_string(),
            name: "Fresh Farms".to_string(),
            contact_person: "Dana Lee".to_string(),
            email: "dana@freshfarms.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Market Rd".to_string(),
            price_per_item_cents: 250,
            status: RecordStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(company.price_per_item().cents(), 250);
    }
}
