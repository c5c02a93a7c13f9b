//! # Transaction Module
//!
//! One shopping session: an id plus the cart it exclusively owns.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Transaction Operations                               │
//! │                                                                         │
//! │  Operator Action          Method                   Cart Change          │
//! │  ───────────────          ──────                   ───────────          │
//! │                                                                         │
//! │  Add item ───────────────► add_item() ───────────► items.push(item)    │
//! │                                                                         │
//! │  Rename / requantify ────► update_item_*() ──────► items[i].field = v  │
//! │                                                                         │
//! │  Remove item ────────────► remove_item() ────────► items.remove(i)     │
//! │                                                                         │
//! │  Reset ──────────────────► reset_transaction() ──► items.clear()       │
//! │                                                                         │
//! │  View cart / totals ─────► render_order(),        (read only)          │
//! │                            price_breakdown()                            │
//! │                                                                         │
//! │  NOTE: a failing operation never touches the cart.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Gaps (kept on purpose)
//! - `add_item` does not enforce [`MIN_UNIT_PRICE`]; only the price update does
//! - `update_item_qty` accepts zero and negative quantities
//! - `update_item_name` does not check the new name against other items

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::discount::DiscountSchedule;
use crate::error::{CoreError, CoreResult, Rejection};
use crate::money::Money;
use crate::types::{LineItem, OrderRow, OrderView, PriceBreakdown, TransactionId};
use crate::validation::validate_item_name;
use crate::MIN_UNIT_PRICE;

// =============================================================================
// Id Allocator
// =============================================================================

/// Hands out transaction ids: 1, 2, 3, ...
///
/// Whoever constructs transactions owns one of these; there is no hidden
/// global counter. The counter is atomic so `&self` is enough to allocate.
#[derive(Debug)]
pub struct TransactionIdAllocator {
    next: AtomicU64,
}

impl TransactionIdAllocator {
    /// Creates an allocator whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        TransactionIdAllocator {
            next: AtomicU64::new(first),
        }
    }

    /// Takes the next id.
    pub fn next_id(&self) -> TransactionId {
        TransactionId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TransactionIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A shopping session owning exactly one cart.
///
/// ## Invariants
/// - `id` is assigned once at construction and never changes
/// - Item names are unique ignoring case (duplicate adds are rejected)
/// - Insertion order is preserved
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    opened_at: DateTime<Utc>,
    items: Vec<LineItem>,
}

impl Transaction {
    /// Opens a transaction with the allocator's next id and an empty cart.
    pub fn new(ids: &TransactionIdAllocator) -> Self {
        Transaction {
            id: ids.next_id(),
            opened_at: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// When the transaction was opened or last reset.
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// The cart's items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Checks whether an item with this name (ignoring case) is in the cart.
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.is_named(name))
    }

    /// Looks an item up by name, ignoring case.
    ///
    /// Scans the whole cart and returns the last match. Names are unique so
    /// there is at most one, unless a rename produced a collision.
    pub fn get_item(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().filter(|i| i.is_named(name)).last()
    }

    /// Position of the first item with this name, ignoring case.
    pub fn get_item_index(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.is_named(name))
    }

    fn item_mut(&mut self, name: &str) -> CoreResult<&mut LineItem> {
        match self.get_item_index(name) {
            Some(idx) => Ok(&mut self.items[idx]),
            None => Err(CoreError::not_found(name)),
        }
    }

    // -------------------------------------------------------------------------
    // Create / Delete
    // -------------------------------------------------------------------------

    /// Adds exactly one item to the end of the cart.
    ///
    /// ## Returns
    /// - `Ok(item)`: a copy of the stored item
    /// - `InvalidInput`: blank name
    /// - `Rejected(ZeroQuantity)`: `qty == 0`
    /// - `Rejected(DuplicateName)`: same name (ignoring case) already present
    pub fn add_item(&mut self, name: &str, qty: i64, unit_price: Money) -> CoreResult<LineItem> {
        validate_item_name(name)?;

        if qty == 0 {
            return Err(Rejection::ZeroQuantity.into());
        }

        if self.contains(name) {
            return Err(Rejection::DuplicateName {
                name: name.to_string(),
            }
            .into());
        }

        let item = LineItem::new(name, qty, unit_price);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Removes an item by name and returns it.
    pub fn remove_item(&mut self, name: &str) -> CoreResult<LineItem> {
        let idx = self
            .get_item_index(name)
            .ok_or_else(|| CoreError::not_found(name))?;
        Ok(self.items.remove(idx))
    }

    /// Empties the cart. The id stays the same.
    pub fn reset_transaction(&mut self) {
        self.items.clear();
        self.opened_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Renames an item in place.
    ///
    /// ## Rules
    /// - A blank `new_name` is `InvalidInput`, the same rule `add_item` applies
    /// - No collision check: renaming onto another item's name is allowed
    pub fn update_item_name(&mut self, name: &str, new_name: &str) -> CoreResult<LineItem> {
        validate_item_name(new_name)?;

        let item = self.item_mut(name)?;
        item.name = new_name.to_string();
        Ok(item.clone())
    }

    /// Sets an item's quantity. Any integer is accepted, including zero.
    pub fn update_item_qty(&mut self, name: &str, new_qty: i64) -> CoreResult<LineItem> {
        let item = self.item_mut(name)?;
        item.qty = new_qty;
        Ok(item.clone())
    }

    /// Sets an item's unit price, rounded to two decimal places.
    ///
    /// ## Rules
    /// - `new_price` below [`MIN_UNIT_PRICE`] is rejected before the lookup,
    ///   so a too-low price for an unknown item reports the rejection
    pub fn update_item_price(&mut self, name: &str, new_price: Money) -> CoreResult<LineItem> {
        if new_price < MIN_UNIT_PRICE {
            return Err(Rejection::PriceBelowMinimum {
                price: new_price,
                min: MIN_UNIT_PRICE,
            }
            .into());
        }

        let item = self.item_mut(name)?;
        item.unit_price = new_price.round_2dp();
        Ok(item.clone())
    }

    // -------------------------------------------------------------------------
    // Pricing & Views
    // -------------------------------------------------------------------------

    /// Sum of qty × unit price over the cart, before discounts.
    pub fn calc_basket_price(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Basket price, standard discount and payable price.
    pub fn price_breakdown(&self) -> PriceBreakdown {
        self.price_breakdown_with(&DiscountSchedule::standard())
    }

    /// Basket price, discount from `schedule` and payable price.
    pub fn price_breakdown_with(&self, schedule: &DiscountSchedule) -> PriceBreakdown {
        let basket_price = self.calc_basket_price();
        PriceBreakdown::new(basket_price, schedule.discount_for(basket_price))
    }

    /// Numbered, ordered view of the cart.
    pub fn render_order(&self) -> OrderView {
        if self.items.is_empty() {
            return OrderView::Empty;
        }

        let rows = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| OrderRow {
                index: i + 1,
                name: item.name.clone(),
                qty: item.qty,
                unit_price: item.unit_price,
            })
            .collect();

        OrderView::Lines {
            transaction_id: self.id,
            rows,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
