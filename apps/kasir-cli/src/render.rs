//! # Console Rendering
//!
//! Turns core view types and outcomes into the text the operator reads.
//! Nothing here touches I/O; the session writes the returned strings.
//!
//! ## Cart Table
//! ```text
//! Transaction number: 3
//! Your cart:
//! ┌───┬────────┬─────┬───────────────┐
//! │ # │ Name   │ Qty │ Price per qty │
//! ├───┼────────┼─────┼───────────────┤
//! │ 1 │ Tempe  │   1 │        200000 │
//! │ 2 │ Combro │   2 │       1500.50 │
//! └───┴────────┴─────┴───────────────┘
//! ```

use chrono::{DateTime, Utc};
use kasir_core::{
    CoreError, ErrorKind, LineItem, OrderView, PriceBreakdown, Rejection, TransactionId,
};
use unicode_width::UnicodeWidthStr;

use crate::menu::UpdateField;

/// Shown instead of a table when the cart has no items.
pub const EMPTY_CART: &str = "Your cart is empty.";

// =============================================================================
// Table Layout
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
}

const HEADERS: [(&str, Align); 4] = [
    ("#", Align::Right),
    ("Name", Align::Left),
    ("Qty", Align::Right),
    ("Price per qty", Align::Right),
];

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match align {
        Align::Left => format!("{cell}{fill}"),
        Align::Right => format!("{fill}{cell}"),
    }
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&mid.to_string()))
}

fn row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(HEADERS.iter().map(|(_, align)| *align))
        .map(|((cell, width), align)| pad(cell, *width, align))
        .collect();
    format!("│ {} │", padded.join(" │ "))
}

/// Renders the cart as a boxed grid, or [`EMPTY_CART`].
pub fn order_table(view: &OrderView) -> String {
    let OrderView::Lines {
        transaction_id,
        rows,
    } = view
    else {
        return EMPTY_CART.to_string();
    };

    let header: Vec<String> = HEADERS.iter().map(|(h, _)| h.to_string()).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.index.to_string(),
                r.name.clone(),
                r.qty.to_string(),
                r.unit_price.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(format!("Transaction number: {transaction_id}"));
    lines.push("Your cart:".to_string());
    lines.push(rule(&widths, '┌', '┬', '┐'));
    lines.push(row(&header, &widths));
    lines.push(rule(&widths, '├', '┼', '┤'));
    lines.extend(body.iter().map(|cells| row(cells, &widths)));
    lines.push(rule(&widths, '└', '┴', '┘'));
    lines.join("\n")
}

/// Transaction number with the time it was opened (or last reset).
pub fn transaction_header(id: TransactionId, opened_at: DateTime<Utc>) -> String {
    format!(
        "Transaction number: {id} (opened {})",
        opened_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Basket price, discount and amount due, one per line.
pub fn breakdown(prices: &PriceBreakdown) -> String {
    format!(
        "Your price breakdown:\nBasket price: {}\nDiscount: {}\nYou pay: {}",
        prices.basket_price, prices.discount, prices.payable
    )
}

// =============================================================================
// Outcome Messages
// =============================================================================

pub fn added(item: &LineItem) -> String {
    format!("{}x {} has been added to the cart.", item.qty, item.name)
}

pub fn removed(item: &LineItem) -> String {
    format!("{}x {} has been removed from the cart.", item.qty, item.name)
}

pub fn renamed(old_name: &str, item: &LineItem) -> String {
    format!("Item {old_name}'s name has been changed to {}.", item.name)
}

pub fn quantity_changed(item: &LineItem) -> String {
    format!("Item {}'s quantity has been changed to {}.", item.name, item.qty)
}

pub fn price_changed(item: &LineItem) -> String {
    format!("Item {}'s price has been changed to {}.", item.name, item.unit_price)
}

pub fn reset_done(id: TransactionId) -> String {
    format!("Reset for transaction #{id} is successful. Your cart is now empty.")
}

// =============================================================================
// Failures
// =============================================================================

/// What to type into the "add item" form.
pub const ADD_ITEM_GUIDANCE: &str = "\
Please check your inputs:
  - Item name should be alphanumeric
  - Quantity should be an integer
  - Price per quantity should be an integer or a decimal";

/// The operation the operator was attempting when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    AddItem,
    /// Picking the item to update, before a field is chosen.
    UpdateItem,
    Update(UpdateField),
    RemoveItem,
}

impl Attempt {
    pub fn action(self) -> &'static str {
        match self {
            Attempt::AddItem => "add item",
            Attempt::UpdateItem | Attempt::Update(_) => "update item",
            Attempt::RemoveItem => "remove item",
        }
    }

    /// Hint for input that did not parse, naming only the fields asked for.
    fn input_guidance(self) -> &'static str {
        match self {
            Attempt::AddItem => ADD_ITEM_GUIDANCE,
            Attempt::Update(UpdateField::Name) => "Item name should be alphanumeric.",
            Attempt::Update(UpdateField::Quantity) => "Quantity should be an integer.",
            Attempt::Update(UpdateField::Price) => {
                "Price per quantity should be an integer or a decimal."
            }
            Attempt::UpdateItem | Attempt::RemoveItem => "Please check your input.",
        }
    }
}

/// Explains a failed operation, with a hint chosen by [`ErrorKind`].
pub fn failure(attempt: Attempt, err: &CoreError) -> String {
    let hint = match err.kind() {
        ErrorKind::InvalidInput => attempt.input_guidance(),
        ErrorKind::NotFound => "Please recheck the item name.",
        ErrorKind::Rejected if matches!(err, CoreError::Rejected(Rejection::DuplicateName { .. })) => {
            "Use a different name, or update the existing item instead."
        }
        ErrorKind::Rejected => "Nothing was changed.",
    };
    format!("Failed to {}. {err}.\n{hint}", attempt.action())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kasir_core::{Money, OrderRow, ValidationError};

    fn view() -> OrderView {
        OrderView::Lines {
            transaction_id: TransactionId::new(3),
            rows: vec![
                OrderRow {
                    index: 1,
                    name: "Tempe".to_string(),
                    qty: 1,
                    unit_price: Money::from_major(200_000),
                },
                OrderRow {
                    index: 2,
                    name: "Combro".to_string(),
                    qty: 2,
                    unit_price: Money::from_cents(150_050),
                },
            ],
        }
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(order_table(&OrderView::Empty), "Your cart is empty.");
    }

    #[test]
    fn test_order_table_layout() {
        let expected = "\
Transaction number: 3
Your cart:
┌───┬────────┬─────┬───────────────┐
│ # │ Name   │ Qty │ Price per qty │
├───┼────────┼─────┼───────────────┤
│ 1 │ Tempe  │   1 │        200000 │
│ 2 │ Combro │   2 │       1500.50 │
└───┴────────┴─────┴───────────────┘";
        assert_eq!(order_table(&view()), expected);
    }

    #[test]
    fn test_wide_characters_keep_columns_aligned() {
        let view = OrderView::Lines {
            transaction_id: TransactionId::new(1),
            rows: vec![OrderRow {
                index: 1,
                name: "珈琲".to_string(),
                qty: 1,
                unit_price: Money::from_major(5),
            }],
        };
        let table = order_table(&view);
        let widths: Vec<usize> = table.lines().skip(2).map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{table}");
    }

    #[test]
    fn test_breakdown() {
        let prices = PriceBreakdown::new(Money::from_major(200_000), Money::zero());
        assert_eq!(
            breakdown(&prices),
            "Your price breakdown:\nBasket price: 200000\nDiscount: 0\nYou pay: 200000"
        );
    }

    #[test]
    fn test_transaction_header_shows_opening_time() {
        let opened_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 5).unwrap();
        assert_eq!(
            transaction_header(TransactionId::new(7), opened_at),
            "Transaction number: 7 (opened 2026-10-19 09:30:05 UTC)"
        );
    }

    #[test]
    fn test_reset_message() {
        assert_eq!(
            reset_done(TransactionId::new(2)),
            "Reset for transaction #2 is successful. Your cart is now empty."
        );
    }

    #[test]
    fn test_outcome_messages() {
        let item = LineItem::new("Tempe", 3, Money::from_major(1_000));
        assert_eq!(added(&item), "3x Tempe has been added to the cart.");
        assert_eq!(removed(&item), "3x Tempe has been removed from the cart.");
        assert_eq!(
            quantity_changed(&item),
            "Item Tempe's quantity has been changed to 3."
        );
        assert_eq!(
            renamed("Tahu", &item),
            "Item Tahu's name has been changed to Tempe."
        );
    }

    #[test]
    fn test_failure_hints() {
        let invalid = CoreError::InvalidInput(ValidationError::Required {
            field: "name".to_string(),
        });
        assert!(failure(Attempt::AddItem, &invalid).contains("Quantity should be an integer"));

        let missing = CoreError::not_found("Tahu");
        assert_eq!(
            failure(Attempt::RemoveItem, &missing),
            "Failed to remove item. Item Tahu is not found.\nPlease recheck the item name."
        );

        let dup: CoreError = Rejection::DuplicateName {
            name: "Tempe".to_string(),
        }
        .into();
        assert!(failure(Attempt::AddItem, &dup).contains("update the existing item"));
    }

    #[test]
    fn test_update_guidance_names_only_the_field() {
        let bad_qty = CoreError::InvalidInput(ValidationError::NotAnInteger {
            field: "quantity".to_string(),
            value: "abc".to_string(),
        });
        let message = failure(Attempt::Update(UpdateField::Quantity), &bad_qty);
        assert!(message.starts_with("Failed to update item."));
        assert!(message.ends_with("Quantity should be an integer."));
        assert!(!message.contains("Item name"));
        assert!(!message.contains("Price per quantity"));
    }
}
