//! # Domain Types
//!
//! Core domain types used throughout Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   OrderView     │   │ PriceBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  Empty          │   │  basket_price   │       │
//! │  │  qty            │   │  Lines {        │   │  discount       │       │
//! │  │  unit_price     │   │    rows[OrderRow]│  │  payable        │       │
//! │  └─────────────────┘   │  }              │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐                                                    │
//! │  │ TransactionId   │   u64, handed out by TransactionIdAllocator       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name Identity
//! Item names are compared case-insensitively ("tempe" == "TEMPE") but are
//! stored exactly as entered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Transaction Id
// =============================================================================

/// Identifier of one shopping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        TransactionId(raw)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One named product entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Name as entered; unique within a cart ignoring case.
    pub name: String,

    /// Quantity. Never zero when created through `add_item`.
    pub qty: i64,

    /// Price of a single unit.
    pub unit_price: Money,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(name: impl Into<String>, qty: i64, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            qty,
            unit_price,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.qty)
    }

    /// Whether this item is identified by `name`, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Case-insensitive item name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

// =============================================================================
// Order View
// =============================================================================

/// One row of a rendered order, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub index: usize,
    pub name: String,
    pub qty: i64,
    pub unit_price: Money,
}

/// Render-ready view of a transaction's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OrderView {
    /// The cart has no items.
    Empty,

    /// The cart's items in insertion order.
    #[serde(rename_all = "camelCase")]
    Lines {
        transaction_id: TransactionId,
        rows: Vec<OrderRow>,
    },
}

impl OrderView {
    /// Checks if the view represents an empty cart.
    pub fn is_empty(&self) -> bool {
        matches!(self, OrderView::Empty)
    }

    /// Returns the rows (none for an empty cart).
    pub fn rows(&self) -> &[OrderRow] {
        match self {
            OrderView::Empty => &[],
            OrderView::Lines { rows, .. } => rows,
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Basket price, discount and what the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Sum of qty × unit price, before discount.
    pub basket_price: Money,

    /// Discount from the tier schedule.
    pub discount: Money,

    /// `basket_price - discount`.
    pub payable: Money,
}

impl PriceBreakdown {
    /// Builds a breakdown from a basket price and its discount.
    pub fn new(basket_price: Money, discount: Money) -> Self {
        PriceBreakdown {
            basket_price,
            discount,
            payable: basket_price - discount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_ignores_case() {
        assert!(names_match("Tempe", "tEMPE"));
        assert!(!names_match("Tempe", "Tahu"));
        assert!(!names_match("Tempe", "Tempe "));
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new("Tahu", 3, Money::from_cents(250));
        assert_eq!(item.line_total(), Money::from_cents(750));
    }

    #[test]
    fn test_breakdown_payable() {
        let b = PriceBreakdown::new(Money::from_major(500_000), Money::from_major(40_000));
        assert_eq!(b.payable, Money::from_major(460_000));
    }

    #[test]
    fn test_order_view_serialization() {
        let view = OrderView::Lines {
            transaction_id: TransactionId::new(7),
            rows: vec![OrderRow {
                index: 1,
                name: "Tempe".to_string(),
                qty: 2,
                unit_price: Money::from_major(5_000),
            }],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "lines");
        assert_eq!(json["transactionId"], 7);
        assert_eq!(json["rows"][0]["unitPrice"], "5000");

        let empty = serde_json::to_value(&OrderView::Empty).unwrap();
        assert_eq!(empty["state"], "empty");
        assert!(OrderView::Empty.rows().is_empty());
    }
}
