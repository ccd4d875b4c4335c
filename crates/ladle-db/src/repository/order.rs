//! # Order Repository
//!
//! Database operations for submitted orders.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Orders Are Stored                                │
//! │                                                                         │
//! │  Order (domain type)                                                   │
//! │  ├── id, company_id, company_name, order_date, ...                     │
//! │  └── items: Vec<OrderItem>                                             │
//! │         │                                                               │
//! │         │ serde_json                                                    │
//! │         ▼                                                               │
//! │  orders.items (TEXT column)                                            │
//! │  [{"id":1,"name":"Rice boxes","packs":[{"id":1,"pack_count":3,...}]}]  │
//! │                                                                         │
//! │  The pack/item tree is written and read as one JSON document: an       │
//! │  order is an immutable snapshot, never edited pack by pack, so there   │
//! │  is nothing to query inside it.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use ladle_core::{Order, OrderItem, OrderStatus, OrderType};

/// Row shape for the orders table. The items column is JSON text; decoding
/// it is the only step between a row and a domain [`Order`].
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    company_id: String,
    company_name: String,
    order_date: NaiveDate,
    items: String,
    total_amount_cents: i64,
    status: OrderStatus,
    order_type: OrderType,
    delivery_address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> DbResult<Order> {
        let items: Vec<OrderItem> = serde_json::from_str(&self.items)?;
        Ok(Order {
            id: self.id,
            company_id: self.company_id,
            company_name: self.company_name,
            order_date: self.order_date,
            items,
            total_amount_cents: self.total_amount_cents,
            status: self.status,
            order_type: self.order_type,
            delivery_address: self.delivery_address,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, company_id, company_name, order_date, items,
           total_amount_cents, status, order_type,
           delivery_address, notes, created_at, updated_at
    FROM orders
"#;

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// repo.insert(&order).await?;
/// let recent = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a submitted order.
    ///
    /// The order arrives fully priced and validated; this is a single
    /// INSERT, so a failure leaves no partial state behind.
    pub async fn insert(&self, order: &Order) -> DbResult<Order> {
        debug!(id = %order.id, company = %order.company_name, "Inserting order");

        let items_json = serde_json::to_string(&order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, company_id, company_name, order_date, items,
                total_amount_cents, status, order_type,
                delivery_address, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&order.id)
        .bind(&order.company_id)
        .bind(&order.company_name)
        .bind(order.order_date)
        .bind(&items_json)
        .bind(order.total_amount_cents)
        .bind(order.status)
        .bind(order.order_type)
        .bind(&order.delivery_address)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(order.clone())
    }

    /// Lists all orders, newest first (by order date, then creation time).
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{} ORDER BY order_date DESC, created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Lists orders whose order date falls within `[from, to]`, newest
    /// first. Feeds the monthly report.
    pub async fn list_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<Order>> {
        debug!(from = %from, to = %to, "Listing orders by date range");

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{} WHERE order_date BETWEEN ?1 AND ?2 ORDER BY order_date DESC, created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Gets an order by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order found
    /// * `Ok(None)` - Order not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_order()?)),
            None => Ok(None),
        }
    }

    /// Sets an order's lifecycle status.
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> DbResult<()> {
        debug!(id = %id, status = ?status, "Setting order status");

        let now = Utc::now();

        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Deletes an order.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Counts orders (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use ladle_core::{Company, OrderDraft, RecordStatus};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn test_company(name: &str, email: &str, price_cents: i64) -> Company {
        let now = Utc::now();
        Company {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            contact_person: "Alex Chen".to_string(),
            email: email.to_string(),
            phone: "555-0101".to_string(),
            address: "1 Supply St".to_string(),
            price_per_item_cents: price_cents,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a priced order through the draft flow: one item, 3 packs of 4,
    /// at $2.50 per item.
    fn test_order(company: &Company, date: NaiveDate) -> Order {
        let mut draft = OrderDraft::new(date);
        draft.select_company(company).unwrap();
        draft.rename_item(1, "Rice boxes");
        draft.update_pack(1, 1, Some(3), Some(4)).unwrap();
        draft.to_order(&generate_order_id(), Utc::now()).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_the_item_tree() {
        let db = test_db().await;
        let company = test_company("Lakeside Catering", "orders@lakeside.com", 250);
        let order = test_order(&company, day(2025, 3, 14));

        db.orders().insert(&order).await.unwrap();

        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.company_name, "Lakeside Catering");
        assert_eq!(loaded.total_amount_cents, 3000);
        assert_eq!(loaded.items, order.items);
        assert_eq!(loaded.items[0].packs[0].total_items, 12);
        assert_eq!(loaded.status, OrderStatus::Processing);
        assert_eq!(loaded.order_type, OrderType::Pickup);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = test_db().await;
        let company = test_company("Lakeside Catering", "orders@lakeside.com", 100);

        let old = test_order(&company, day(2025, 3, 1));
        let new = test_order(&company, day(2025, 3, 20));
        db.orders().insert(&old).await.unwrap();
        db.orders().insert(&new).await.unwrap();

        let orders = db.orders().list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, new.id);
        assert_eq!(orders[1].id, old.id);
    }

    #[tokio::test]
    async fn test_date_range_listing() {
        let db = test_db().await;
        let company = test_company("Lakeside Catering", "orders@lakeside.com", 100);

        db.orders()
            .insert(&test_order(&company, day(2025, 2, 28)))
            .await
            .unwrap();
        db.orders()
            .insert(&test_order(&company, day(2025, 3, 1)))
            .await
            .unwrap();
        db.orders()
            .insert(&test_order(&company, day(2025, 3, 31)))
            .await
            .unwrap();
        db.orders()
            .insert(&test_order(&company, day(2025, 4, 1)))
            .await
            .unwrap();

        let march = db
            .orders()
            .list_by_date_range(day(2025, 3, 1), day(2025, 3, 31))
            .await
            .unwrap();
        assert_eq!(march.len(), 2);
    }

    #[tokio::test]
    async fn test_status_update_and_delete() {
        let db = test_db().await;
        let company = test_company("Lakeside Catering", "orders@lakeside.com", 100);
        let order = test_order(&company, day(2025, 3, 14));
        db.orders().insert(&order).await.unwrap();

        db.orders()
            .set_status(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Completed);

        db.orders().delete(&order.id).await.unwrap();
        assert!(db.orders().get_by_id(&order.id).await.unwrap().is_none());

        let err = db
            .orders()
            .set_status(&order.id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_orders_survive_company_deletion() {
        let db = test_db().await;
        let company = test_company("Lakeside Catering", "orders@lakeside.com", 250);
        db.companies().insert(&company).await.unwrap();

        let order = test_order(&company, day(2025, 3, 14));
        db.orders().insert(&order).await.unwrap();

        db.companies().delete(&company.id).await.unwrap();

        // The snapshot keeps the order fully readable
        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.company_name, "Lakeside Catering");
        assert_eq!(loaded.total_amount_cents, 3000);
    }
}
