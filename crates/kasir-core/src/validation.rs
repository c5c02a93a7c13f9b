//! # Validation Module
//!
//! Turns raw operator input into typed values, and checks the shape rules
//! cart operations rely on.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console shell (kasir-cli)                                    │
//! │  ├── Reads a line per prompt                                           │
//! │  └── Hands the raw string over untouched                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_item_name / parse_quantity / parse_price                    │
//! │  └── Ok(value) | Err(ValidationError)  → CoreError::InvalidInput       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Transaction                                                  │
//! │  ├── Zero quantity, duplicate name    → CoreError::Rejected            │
//! │  └── Unknown item                     → CoreError::NotFound            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::{parse_quantity, NewLineItem};
//!
//! assert_eq!(parse_quantity(" 5 ").unwrap(), 5);
//! assert!(parse_quantity("5.5").is_err());
//!
//! let draft = NewLineItem::parse("Tempe", "1", "200000").unwrap();
//! assert_eq!(draft.qty, 1);
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)
}

/// Parses an item name from raw input, trimming surrounding whitespace.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::parse_item_name;
///
/// assert_eq!(parse_item_name("  Tempe Goreng ").unwrap(), "Tempe Goreng");
/// assert!(parse_item_name("   ").is_err());
/// ```
pub fn parse_item_name(raw: &str) -> ValidationResult<String> {
    let name = raw.trim();
    validate_item_name(name)?;
    Ok(name.to_string())
}

fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a quantity.
///
/// ## Rules
/// - Must be a whole number (`"3"`, `"-1"`, `"+2"`)
/// - Zero parses fine; whether zero is allowed is the cart's decision
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Add Item                                                               │
/// │                                                                         │
/// │  Quantity: 2.5                                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("2.5") ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── not a whole number? → NotAnInteger → guidance, back to menu  │
/// │       │                                                                 │
/// │       └── OK(i64) → add_item                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field: "quantity".to_string(),
            value: trimmed.to_string(),
        })
}

/// Parses a price (integer or decimal).
///
/// ## Rules
/// - Plain (`"1500"`, `"12.50"`) and scientific (`"1.5e3"`) notation
/// - No range check: the add path accepts any number, the update path
///   enforces its own minimum
///
/// ## Example
/// ```rust
/// use kasir_core::validation::parse_price;
/// use kasir_core::Money;
///
/// assert_eq!(parse_price("12.50").unwrap(), Money::from_cents(1250));
/// assert_eq!(parse_price("1.5e3").unwrap(), Money::from_major(1500));
/// assert!(parse_price("twelve").is_err());
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<Money> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(Money::new)
        .map_err(|_| ValidationError::NotANumber {
            field: "price".to_string(),
            value: trimmed.to_string(),
        })
}

/// Validates a fraction such as a discount rate.
///
/// ## Rules
/// - Must be between 0 and 1 inclusive
pub fn validate_rate(field: &str, rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE,
        });
    }
    Ok(())
}

// =============================================================================
// Combined Parse Step
// =============================================================================

/// A line item parsed from raw input, not yet in any cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub name: String,
    pub qty: i64,
    pub unit_price: Money,
}

impl NewLineItem {
    /// Parses the three raw fields of the "add item" form.
    ///
    /// Fields are checked in order (name, quantity, price) and the first
    /// failure is returned.
    pub fn parse(name: &str, qty: &str, unit_price: &str) -> ValidationResult<Self> {
        Ok(NewLineItem {
            name: parse_item_name(name)?,
            qty: parse_quantity(qty)?,
            unit_price: parse_price(unit_price)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Tempe").is_ok());
        assert!(validate_item_name("Kopi 200ml").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(" \t").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 100 ").unwrap(), 100);
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity("-3").unwrap(), -3);
        assert_eq!(parse_quantity("+2").unwrap(), 2);

        assert!(matches!(
            parse_quantity("Tempe"),
            Err(ValidationError::NotAnInteger { .. })
        ));
        assert!(parse_quantity("1.0").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("100").unwrap(), Money::from_major(100));
        assert_eq!(parse_price("100.00").unwrap(), Money::from_major(100));
        assert_eq!(parse_price("0.1").unwrap(), crate::MIN_UNIT_PRICE);
        assert_eq!(parse_price("-5").unwrap(), Money::from_major(-5));

        assert!(matches!(
            parse_price("Tempe"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(parse_price("").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("rate", Decimal::ZERO).is_ok());
        assert!(validate_rate("rate", Decimal::new(8, 2)).is_ok());
        assert!(validate_rate("rate", Decimal::ONE).is_ok());
        assert!(validate_rate("rate", Decimal::new(11, 1)).is_err());
        assert!(validate_rate("rate", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_new_line_item_reports_first_bad_field() {
        let ok = NewLineItem::parse("Tahu", "10", "100.00").unwrap();
        assert_eq!(ok.name, "Tahu");
        assert_eq!(ok.qty, 10);
        assert_eq!(ok.unit_price, Money::from_major(100));

        let err = NewLineItem::parse("Tahu", "ten", "abc").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAnInteger {
                field: "quantity".to_string(),
                value: "ten".to_string(),
            }
        );
    }
}
