//! # Pricing Engine
//!
//! Deterministic, side-effect-free computation of order totals from
//! quantities and a unit price.
//!
//! ## Recomputation Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bottom-Up Recomputation                             │
//! │                                                                         │
//! │  edit pack / change company / add item                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pack_total()    total_items = pack_count × items_per_pack              │
//! │       │          total_price = total_items × unit_price                 │
//! │       ▼                                                                 │
//! │  item_total()    sums its packs, in sequence order                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  order_total()   sums the ALREADY-COMPUTED item totals                  │
//! │                                                                         │
//! │  recompute_items() runs the whole cascade and returns a NEW tree;       │
//! │  the old tree is never patched in place.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order level deliberately sums stored item totals rather than
//! re-deriving from raw quantities, so a partial recomputation can never
//! disagree with the item-level figures a user is looking at.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderItem, PackConfiguration};

/// Computed totals for one level of the order tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Total number of individual items.
    pub total_items: i64,
    /// Price for those items at the unit price.
    pub total_price: Money,
}

/// Computes the totals of a single pack configuration.
///
/// `total_items = pack_count × items_per_pack`, then
/// `total_price = total_items × unit_price`.
///
/// Quantities below 1 never occur in a valid draft; they are refused here as
/// the engine's own floor rather than silently repaired. The unit price is
/// not re-checked (company validation keeps it non-negative).
///
/// ## Example
/// ```rust
/// use ladle_core::money::Money;
/// use ladle_core::pricing::pack_total;
///
/// let totals = pack_total(3, 4, Money::from_cents(250)).unwrap();
/// assert_eq!(totals.total_items, 12);
/// assert_eq!(totals.total_price.cents(), 3000); // $30.00
/// ```
pub fn pack_total(pack_count: i64, items_per_pack: i64, unit_price: Money) -> CoreResult<Totals> {
    if pack_count < 1 {
        return Err(CoreError::InvalidQuantity {
            field: "pack_count",
            value: pack_count,
        });
    }
    if items_per_pack < 1 {
        return Err(CoreError::InvalidQuantity {
            field: "items_per_pack",
            value: items_per_pack,
        });
    }

    let total_items = pack_count * items_per_pack;
    Ok(Totals {
        total_items,
        total_price: unit_price.multiply_quantity(total_items),
    })
}

/// Computes an item's totals by summing `pack_total` over its packs, in
/// sequence order.
pub fn item_total(packs: &[PackConfiguration], unit_price: Money) -> CoreResult<Totals> {
    let mut totals = Totals {
        total_items: 0,
        total_price: Money::zero(),
    };
    for pack in packs {
        let pack_totals = pack_total(pack.pack_count, pack.items_per_pack, unit_price)?;
        totals.total_items += pack_totals.total_items;
        totals.total_price += pack_totals.total_price;
    }
    Ok(totals)
}

/// Computes the order total by summing the already-computed item totals.
///
/// This is intentionally NOT a re-derivation from raw quantities: after a
/// partial edit, the order figure must agree with whatever the item rows
/// show.
pub fn order_total(items: &[OrderItem]) -> Money {
    Money::from_cents(items.iter().map(|item| item.total_price_cents).sum())
}

/// Recomputes every pack, then every item, then the order total, in that
/// dependency order, against the given unit price.
///
/// Returns a freshly built item tree and the order total. The input is never
/// mutated, so a holder of the previous tree keeps a consistent snapshot.
pub fn recompute_items(
    items: &[OrderItem],
    unit_price: Money,
) -> CoreResult<(Vec<OrderItem>, Money)> {
    let mut new_items = Vec::with_capacity(items.len());

    for item in items {
        let mut new_packs = Vec::with_capacity(item.packs.len());
        for pack in &item.packs {
            let totals = pack_total(pack.pack_count, pack.items_per_pack, unit_price)?;
            new_packs.push(PackConfiguration {
                id: pack.id,
                pack_count: pack.pack_count,
                items_per_pack: pack.items_per_pack,
                total_items: totals.total_items,
                total_price_cents: totals.total_price.cents(),
            });
        }

        let totals = item_total(&new_packs, unit_price)?;
        new_items.push(OrderItem {
            id: item.id,
            name: item.name.clone(),
            packs: new_packs,
            total_items: totals.total_items,
            total_price_cents: totals.total_price.cents(),
        });
    }

    let total = order_total(&new_items);
    Ok((new_items, total))
}

// =============================================================================
// Unit Tests
// =============================================================================
