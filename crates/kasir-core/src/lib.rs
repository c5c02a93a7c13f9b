//! # kasir-core: Pure Business Logic for Kasir
//!
//! This crate is the **heart** of Kasir. It owns the cart data model, its
//! CRUD rules and the discount schedule, all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kasir-cli (Console Shell)                    │   │
//! │  │    Menu loop ──► Prompts ──► Tables ──► Guidance text          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw strings in, typed results out     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │transaction │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ Transaction│  │  parsing  │  │   │
//! │  │   │ OrderView │  │           │  │ IdAllocator│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                       ┌───────────┐                             │   │
//! │  │                       │ discount  │                             │   │
//! │  │                       │ tiers     │                             │   │
//! │  │                       └───────────┘                             │   │
//! │  │   NO I/O • NO TERMINAL • NO FILES • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, TransactionId, OrderView, ...)
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Raw input parsing and business rule checks
//! - [`discount`] - Tiered basket discount
//! - [`transaction`] - The cart and its CRUD operations
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::{Money, Transaction, TransactionIdAllocator};
//!
//! let ids = TransactionIdAllocator::new();
//! let mut tx = Transaction::new(&ids);
//!
//! tx.add_item("Tempe", 1, Money::from_major(200_000)).unwrap();
//! tx.add_item("Combro", 1, Money::from_major(300_000)).unwrap();
//!
//! let breakdown = tx.price_breakdown();
//! assert_eq!(breakdown.basket_price, Money::from_major(500_000));
//! assert_eq!(breakdown.discount, Money::from_major(40_000)); // 8%
//! assert_eq!(breakdown.payable, Money::from_major(460_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod transaction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kasir_core::Money` instead of
// `use kasir_core::money::Money`

pub use discount::{calc_discount, DiscountSchedule, DiscountTier};
pub use error::{CoreError, CoreResult, ErrorKind, Rejection, ValidationError};
pub use money::Money;
pub use transaction::{Transaction, TransactionIdAllocator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest unit price accepted by [`Transaction::update_item_price`] (0.1).
///
/// ## Note
/// Only the update path enforces this. Items added through
/// [`Transaction::add_item`] keep whatever price they were created with.
pub const MIN_UNIT_PRICE: Money = Money::new(rust_decimal::Decimal::from_parts(1, 0, 0, false, 1));

/// Number of decimal places prices and discounts are rounded to.
pub const PRICE_DECIMALS: u32 = 2;
