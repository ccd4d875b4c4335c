//! # Order Draft
//!
//! The in-memory order under composition. One draft per session; every edit
//! rebuilds the priced tree bottom-up through [`crate::pricing`].
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Draft Edit Operations                               │
//! │                                                                         │
//! │  User Action              Draft Method            Result                │
//! │  ───────────              ────────────            ──────                │
//! │                                                                         │
//! │  Pick company ───────────► select_company() ────► reprice whole tree   │
//! │                                                                         │
//! │  Add item ───────────────► add_item() ──────────► seed {1 × 1} pack    │
//! │                                                                         │
//! │  Edit quantity ──────────► update_pack() ───────► recompute cascade    │
//! │                                                   (values < 1 ignored) │
//! │                                                                         │
//! │  Remove item/pack ───────► remove_*() ──────────► no-op when last      │
//! │                                                                         │
//! │  Submit ─────────────────► to_order() ──────────► validate + freeze    │
//! │                                                                         │
//! │  NOTE: every quantity edit swaps in a freshly recomputed items tree;    │
//! │        derived totals are never patched in place.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing;
use crate::types::{Company, Order, OrderItem, OrderStatus, OrderType, PackConfiguration};
use crate::validation::validate_order_submission;

/// An order being composed.
///
/// ## Invariants
/// - `items` is never empty; every item has at least one pack
/// - every quantity is ≥ 1
/// - `total_amount_cents` and the per-item/per-pack totals always reflect the
///   current quantities at the current unit price
///
/// The unit price is captured from the selected company and replaced whenever
/// the selection changes; it is zero until a company is chosen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Selected company, if any.
    pub company_id: Option<String>,
    /// Name snapshot of the selected company.
    pub company_name: Option<String>,
    /// Per-item price captured from the selected company (0 when none).
    pub unit_price_cents: i64,
    /// The date the order is for.
    #[ts(as = "String")]
    pub order_date: NaiveDate,
    pub order_type: OrderType,
    /// Free text while composing; only persisted for delivery orders.
    pub delivery_address: String,
    pub notes: String,
    /// The priced item tree. Never empty.
    pub items: Vec<OrderItem>,
    /// Derived: sum of item totals.
    pub total_amount_cents: i64,
}

impl OrderDraft {
    /// Creates a fresh draft for the given date: one unnamed item holding a
    /// single `1 × 1` pack, unpriced until a company is selected.
    pub fn new(order_date: NaiveDate) -> Self {
        OrderDraft {
            company_id: None,
            company_name: None,
            unit_price_cents: 0,
            order_date,
            order_type: OrderType::default(),
            delivery_address: String::new(),
            notes: String::new(),
            items: vec![seed_item(1, Money::zero())],
            total_amount_cents: 0,
        }
    }

    /// Returns the captured unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the draft total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Selects a company and reprices every pack, item, and the order total
    /// against its per-item price. No stale figure survives the switch.
    pub fn select_company(&mut self, company: &Company) -> CoreResult<()> {
        self.company_id = Some(company.id.clone());
        self.company_name = Some(company.name.clone());
        self.unit_price_cents = company.price_per_item_cents;
        self.refresh()
    }

    /// Appends a new item seeded with one `1 × 1` pack, priced at the current
    /// unit price.
    pub fn add_item(&mut self) -> CoreResult<()> {
        let id = next_id(self.items.iter().map(|item| item.id));
        self.items.push(seed_item(id, self.unit_price()));
        self.refresh()
    }

    /// Removes an item. Silently does nothing when the item is the draft's
    /// last one, or when the id is unknown.
    pub fn remove_item(&mut self, item_id: i64) -> CoreResult<()> {
        if self.items.len() <= 1 {
            return Ok(());
        }
        self.items.retain(|item| item.id != item_id);
        self.refresh()
    }

    /// Sets an item's name. Names do not participate in pricing, so no
    /// recomputation happens. Unknown ids are ignored.
    pub fn rename_item(&mut self, item_id: i64, name: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            item.name = name.to_string();
        }
    }

    /// Appends a `1 × 1` pack to an item. Unknown item ids are ignored.
    pub fn add_pack(&mut self, item_id: i64) -> CoreResult<()> {
        let unit_price = self.unit_price();
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            let id = next_id(item.packs.iter().map(|pack| pack.id));
            item.packs.push(seed_pack(id, unit_price));
        }
        self.refresh()
    }

    /// Removes a pack from an item. Silently does nothing when the pack is
    /// the item's last one, or when either id is unknown.
    pub fn remove_pack(&mut self, item_id: i64, pack_id: i64) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            if item.packs.len() > 1 {
                item.packs.retain(|pack| pack.id != pack_id);
            }
        }
        self.refresh()
    }

    /// Updates a pack's quantities and recomputes the cascade.
    ///
    /// Values below 1 are ignored, field by field: the domain never allows
    /// zero or negative packs, so a bad input leaves the previous quantity in
    /// place rather than failing the edit.
    pub fn update_pack(
        &mut self,
        item_id: i64,
        pack_id: i64,
        pack_count: Option<i64>,
        items_per_pack: Option<i64>,
    ) -> CoreResult<()> {
        if let Some(pack) = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .and_then(|item| item.packs.iter_mut().find(|pack| pack.id == pack_id))
        {
            if let Some(count) = pack_count {
                if count >= 1 {
                    pack.pack_count = count;
                }
            }
            if let Some(per_pack) = items_per_pack {
                if per_pack >= 1 {
                    pack.items_per_pack = per_pack;
                }
            }
        }
        self.refresh()
    }

    /// Sets the date the order is for.
    pub fn set_order_date(&mut self, order_date: NaiveDate) {
        self.order_date = order_date;
    }

    /// Sets the fulfilment type. The delivery address is kept even when
    /// switching away from delivery, in case the user switches back.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
    }

    /// Sets the delivery address.
    pub fn set_delivery_address(&mut self, address: &str) {
        self.delivery_address = address.to_string();
    }

    /// Sets the order notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    /// Validates the draft and freezes it into an [`Order`] record.
    ///
    /// Runs the submission rules first (company selected, item names
    /// present, delivery address when delivering); the draft itself is
    /// untouched either way, so a failed submit leaves composition exactly
    /// where it was. The returned order starts in `Processing`.
    pub fn to_order(&self, id: &str, now: DateTime<Utc>) -> CoreResult<Order> {
        validate_order_submission(self)?;

        let delivery_address = match self.order_type {
            OrderType::Delivery => Some(self.delivery_address.trim().to_string()),
            _ => None,
        };
        let notes = match self.notes.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };

        Ok(Order {
            id: id.to_string(),
            // Validation guarantees a selected company
            company_id: self.company_id.clone().unwrap_or_default(),
            company_name: self.company_name.clone().unwrap_or_default(),
            order_date: self.order_date,
            items: self.items.clone(),
            total_amount_cents: self.total_amount_cents,
            status: OrderStatus::Processing,
            order_type: self.order_type,
            delivery_address,
            notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds the priced tree bottom-up and swaps it in whole.
    fn refresh(&mut self) -> CoreResult<()> {
        let (items, total) = pricing::recompute_items(&self.items, self.unit_price())?;
        self.items = items;
        self.total_amount_cents = total.cents();
        Ok(())
    }
}

/// Next id within a draft collection. Uses max+1 so removals never cause a
/// later collision.
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn seed_pack(id: i64, unit_price: Money) -> PackConfiguration {
    PackConfiguration {
        id,
        pack_count: 1,
        items_per_pack: 1,
        total_items: 1,
        total_price_cents: unit_price.cents(),
    }
}

fn seed_item(id: i64, unit_price: Money) -> OrderItem {
    OrderItem {
        id,
        name: String::new(),
        packs: vec![seed_pack(1, unit_price)],
        total_items: 1,
        total_price_cents: unit_price.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::types::RecordStatus;

    fn test_company(id: &str, price_per_item_cents: i64) -> Company {
        Company {
            id: id.to_string(),
            name: format!("Company {}", id),
            contact_person: "Alex Chen".to_string(),
            email: format!("orders@company-{}.com", id),
            phone: "555-0101".to_string(),
            address: "1 Supply St".to_string(),
            price_per_item_cents,
            status: RecordStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_new_draft_seeds_one_item_one_pack() {
        let draft = OrderDraft::new(test_date());

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].packs.len(), 1);
        assert_eq!(draft.items[0].packs[0].pack_count, 1);
        assert_eq!(draft.items[0].packs[0].items_per_pack, 1);
        assert_eq!(draft.total_amount_cents, 0);
        assert!(draft.company_id.is_none());
    }

    #[test]
    fn test_select_company_prices_the_tree() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();

        // The seeded 1 × 1 pack now costs one unit price
        assert_eq!(draft.items[0].packs[0].total_price_cents, 250);
        assert_eq!(draft.items[0].total_price_cents, 250);
        assert_eq!(draft.total_amount_cents, 250);
    }

    #[test]
    fn test_update_pack_recomputes_cascade() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();

        draft.update_pack(1, 1, Some(3), Some(4)).unwrap();

        let pack = &draft.items[0].packs[0];
        assert_eq!(pack.total_items, 12);
        assert_eq!(pack.total_price_cents, 3000);
        assert_eq!(draft.items[0].total_items, 12);
        assert_eq!(draft.items[0].total_price_cents, 3000);
        assert_eq!(draft.total_amount_cents, 3000);
    }

    #[test]
    fn test_update_pack_ignores_sub_one_values() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();
        draft.update_pack(1, 1, Some(3), Some(4)).unwrap();

        // Both fields below the minimum: nothing changes
        draft.update_pack(1, 1, Some(0), Some(-2)).unwrap();
        assert_eq!(draft.items[0].packs[0].pack_count, 3);
        assert_eq!(draft.items[0].packs[0].items_per_pack, 4);
        assert_eq!(draft.total_amount_cents, 3000);

        // One good field, one bad: only the good one applies
        draft.update_pack(1, 1, Some(0), Some(2)).unwrap();
        assert_eq!(draft.items[0].packs[0].pack_count, 3);
        assert_eq!(draft.items[0].packs[0].items_per_pack, 2);
        assert_eq!(draft.total_amount_cents, 1500);
    }

    #[test]
    fn test_add_item_seeds_at_current_unit_price() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();

        draft.add_item().unwrap();

        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[1].id, 2);
        assert_eq!(draft.items[1].total_price_cents, 250);
        assert_eq!(draft.total_amount_cents, 500);
    }

    #[test]
    fn test_remove_last_item_is_a_no_op() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();

        draft.remove_item(1).unwrap();

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.total_amount_cents, 250);
    }

    #[test]
    fn test_remove_last_pack_is_a_no_op() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();

        draft.remove_pack(1, 1).unwrap();

        assert_eq!(draft.items[0].packs.len(), 1);
    }

    #[test]
    fn test_remove_non_last_pack_and_item() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 100)).unwrap();

        draft.add_pack(1).unwrap();
        draft.update_pack(1, 2, Some(2), Some(5)).unwrap();
        assert_eq!(draft.items[0].packs.len(), 2);
        assert_eq!(draft.total_amount_cents, 1100); // 1 + 10 items

        draft.remove_pack(1, 1).unwrap();
        assert_eq!(draft.items[0].packs.len(), 1);
        assert_eq!(draft.items[0].packs[0].id, 2);
        assert_eq!(draft.total_amount_cents, 1000);

        draft.add_item().unwrap();
        draft.remove_item(1).unwrap();
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].id, 2);
        assert_eq!(draft.total_amount_cents, 100);
    }

    #[test]
    fn test_item_ids_do_not_collide_after_removal() {
        let mut draft = OrderDraft::new(test_date());
        draft.add_item().unwrap(); // ids 1, 2
        draft.remove_item(1).unwrap(); // id 2 remains
        draft.add_item().unwrap(); // must not reuse 2

        let ids: Vec<i64> = draft.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_reselecting_company_reprices_everything() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 100)).unwrap();
        draft.update_pack(1, 1, Some(3), Some(4)).unwrap();
        draft.add_item().unwrap();
        draft.update_pack(2, 1, Some(2), Some(5)).unwrap();
        assert_eq!(draft.total_amount_cents, 2200); // 22 items at $1.00

        draft.select_company(&test_company("2", 250)).unwrap();

        assert_eq!(draft.unit_price_cents, 250);
        assert_eq!(draft.items[0].packs[0].total_price_cents, 3000);
        assert_eq!(draft.items[1].packs[0].total_price_cents, 2500);
        assert_eq!(draft.total_amount_cents, 5500); // 22 items at $2.50
    }

    #[test]
    fn test_two_item_order_total() {
        // One item {3,4}, one item with packs {2,5} + {1,3}, at $2.50
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();
        draft.rename_item(1, "Rice boxes");
        draft.update_pack(1, 1, Some(3), Some(4)).unwrap();

        draft.add_item().unwrap();
        draft.rename_item(2, "Noodle trays");
        draft.update_pack(2, 1, Some(2), Some(5)).unwrap();
        draft.add_pack(2).unwrap();
        draft.update_pack(2, 2, Some(1), Some(3)).unwrap();

        assert_eq!(draft.items[0].total_price_cents, 3000);
        assert_eq!(draft.items[1].total_items, 13);
        assert_eq!(draft.items[1].total_price_cents, 3250);
        assert_eq!(draft.total_amount_cents, 6250);
    }

    #[test]
    fn test_to_order_happy_path() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();
        draft.rename_item(1, "Rice boxes");
        draft.update_pack(1, 1, Some(3), Some(4)).unwrap();
        draft.set_notes("  leave at reception  ");

        let now = Utc::now();
        let order = draft.to_order("order-1", now).unwrap();

        assert_eq!(order.id, "order-1");
        assert_eq!(order.company_id, "1");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total_amount_cents, 3000);
        assert_eq!(order.items.len(), 1);
        // Pickup order: no delivery address persisted
        assert_eq!(order.delivery_address, None);
        assert_eq!(order.notes.as_deref(), Some("leave at reception"));
    }

    #[test]
    fn test_to_order_requires_company() {
        let mut draft = OrderDraft::new(test_date());
        draft.rename_item(1, "Rice boxes");

        let err = draft.to_order("order-1", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingCompany)
        ));
    }

    #[test]
    fn test_to_order_requires_item_names() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();
        draft.rename_item(1, "   ");

        let err = draft.to_order("order-1", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyItemName { item_id: 1 })
        ));
    }

    #[test]
    fn test_to_order_requires_delivery_address_for_delivery() {
        let mut draft = OrderDraft::new(test_date());
        draft.select_company(&test_company("1", 250)).unwrap();
        draft.rename_item(1, "Rice boxes");
        draft.set_order_type(OrderType::Delivery);

        let before = draft.clone();
        let err = draft.to_order("order-1", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DeliveryAddressRequired)
        ));
        // Failed submit leaves the draft exactly as it was
        assert_eq!(draft.total_amount_cents, before.total_amount_cents);
        assert_eq!(draft.items, before.items);

        draft.set_delivery_address("12 Market Rd");
        let order = draft.to_order("order-1", Utc::now()).unwrap();
        assert_eq!(order.delivery_address.as_deref(), Some("12 Market Rd"));
    }
}
