//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - What every cart operation can report           │
//! │  │   ├── InvalidInput   (wraps ValidationError)                        │
//! │  │   ├── NotFound       (item name absent from cart)                   │
//! │  │   └── Rejected       (wraps Rejection)                              │
//! │  ├── ValidationError  - Argument fails a type/shape constraint         │
//! │  └── Rejection        - Well-typed but semantically invalid            │
//! │                                                                         │
//! │  kasir-cli errors (separate crate)                                     │
//! │  └── ConfigError      - Config file / env problems                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → guidance text → re-prompt         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, field, value)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is fatal: every variant is reported and the cart is unchanged

use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors reported by cart operations.
///
/// Every failing operation leaves the transaction exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An argument failed a type/shape constraint.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The referenced item is not in the cart.
    #[error("Item {name} is not found")]
    NotFound { name: String },

    /// The operation is well-typed but not allowed.
    #[error("{0}")]
    Rejected(#[from] Rejection),
}

impl CoreError {
    /// Creates a `NotFound` error for the given item name.
    pub fn not_found(name: impl Into<String>) -> Self {
        CoreError::NotFound { name: name.into() }
    }

    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidInput(_) => ErrorKind::InvalidInput,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Rejected(_) => ErrorKind::Rejected,
        }
    }
}

/// Coarse error category, used by the shell to pick guidance text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Rejected,
}

// =============================================================================
// Rejection
// =============================================================================

/// Reasons a well-typed operation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Items cannot be added with a quantity of zero.
    #[error("Cannot add item with 0 quantity")]
    ZeroQuantity,

    /// An item with the same (case-insensitive) name is already in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: [Tempe x1]
    ///      │
    ///      ▼
    /// add_item("TEMPE", 2, 5000)
    ///      │
    ///      ▼
    /// DuplicateName { name: "TEMPE" }
    ///      │
    ///      ▼
    /// Shell suggests updating the existing item instead
    /// ```
    #[error("An item with the same name as {name} is already in the cart")]
    DuplicateName { name: String },

    /// A price update went below the minimum unit price.
    #[error("Item price {price} cannot be lower than {min}")]
    PriceBelowMinimum { price: Money, min: Money },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a raw value cannot be turned into the type an operation
/// needs. Used by the parsing step before any cart operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value should have been an integer.
    #[error("{field} should be an integer, got '{value}'")]
    NotAnInteger { field: String, value: String },

    /// Value should have been a number (integer or decimal).
    #[error("{field} should be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found("Tempe");
        assert_eq!(err.to_string(), "Item Tempe is not found");

        let err: CoreError = Rejection::ZeroQuantity.into();
        assert_eq!(err.to_string(), "Cannot add item with 0 quantity");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NotAnInteger {
            field: "quantity".to_string(),
            value: "two".to_string(),
        };
        assert_eq!(err.to_string(), "quantity should be an integer, got 'two'");
    }

    #[test]
    fn test_price_below_minimum_message() {
        let err = Rejection::PriceBelowMinimum {
            price: Money::from_cents(5),
            min: crate::MIN_UNIT_PRICE,
        };
        assert_eq!(err.to_string(), "Item price 0.05 cannot be lower than 0.1");
    }

    #[test]
    fn test_kinds() {
        let invalid: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidInput);
        assert_eq!(CoreError::not_found("x").kind(), ErrorKind::NotFound);

        let rejected: CoreError = Rejection::DuplicateName {
            name: "Tahu".to_string(),
        }
        .into();
        assert_eq!(rejected.kind(), ErrorKind::Rejected);
    }
}
