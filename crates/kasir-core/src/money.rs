//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    round(2.675, 2) = 2.67           ❌ (2.675 is really 2.67499999...)  │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal                                          │
//! │    Decimal("0.1") + Decimal("0.2") = 0.3                                │
//! │    Prices keep exactly the digits the operator typed                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//!
//! let doubled = price.multiply_quantity(2);          // 21.98
//! let total = price + Money::from_cents(500);        // 15.99
//! assert_eq!(total, Money::from_cents(1599));
//! assert_eq!(doubled, Money::from_cents(2198));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::PRICE_DECIMALS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact base-10 decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values are representable; the cart does
///   not forbid them on the creation path
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Saturating arithmetic**: operator input can be arbitrarily large, so
///   sums and products clamp at the `Decimal` bounds instead of panicking
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  LineItem.unit_price ──► LineItem.line_total ──► basket price           │
/// │                                                                         │
/// │  basket price ──► DiscountSchedule ──► discount ──► payable price       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::from_major(200_000);
    /// assert_eq!(price.to_string(), "200000");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Creates a Money value from hundredths of a unit.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to two decimal places using Bankers Rounding.
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.005 → 0.01, 0.015 → 0.02, 0.025 → 0.03 (always up = +bias)    │
    /// │                                                                     │
    /// │  Bankers Rounding rounds the midpoint to the nearest EVEN digit:   │
    /// │    0.005 → 0.00, 0.015 → 0.02, 0.025 → 0.02 (alternates)           │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(24_000_0008, 4)); // 24000.0008
    /// assert_eq!(m.round_2dp(), Money::from_cents(2_400_000));
    ///
    /// let half = Money::new(Decimal::new(2_025, 3)); // 2.025
    /// assert_eq!(half.round_2dp(), Money::from_cents(202));
    /// ```
    pub fn round_2dp(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Money {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Returns `rate` of this amount, rounded to two decimal places.
    ///
    /// ## Arguments
    /// * `rate` - Fraction of the amount (0.08 = 8%)
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let basket = Money::from_major(500_000);
    /// let discount = basket.portion(Decimal::new(8, 2)); // 8%
    /// assert_eq!(discount, Money::from_major(40_000));
    /// ```
    pub fn portion(&self, rate: Decimal) -> Money {
        if rate.is_zero() {
            return Money::zero();
        }
        Money(self.0.saturating_mul(rate)).round_2dp()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with the digits it carries, without currency symbols.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
        assert_eq!(money.to_string(), "10.99");
    }

    #[test]
    fn test_display_keeps_entered_digits() {
        assert_eq!(Money::from_major(200_000).to_string(), "200000");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a.multiply_quantity(3), Money::from_cents(3000));

        let mut c = a;
        c += b;
        c -= Money::from_cents(100);
        assert_eq!(c, Money::from_cents(1400));
    }

    #[test]
    fn test_no_float_drift() {
        let a = Money::new(Decimal::new(1, 1));
        let b = Money::new(Decimal::new(2, 1));
        assert_eq!(a + b, Money::new(Decimal::new(3, 1)));
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total, Money::from_cents(355));
    }

    #[test]
    fn test_round_2dp_is_bankers() {
        assert_eq!(
            Money::new(Decimal::new(2_015, 3)).round_2dp(),
            Money::from_cents(202)
        );
        assert_eq!(
            Money::new(Decimal::new(2_025, 3)).round_2dp(),
            Money::from_cents(202)
        );
        assert_eq!(
            Money::new(Decimal::new(2_026, 3)).round_2dp(),
            Money::from_cents(203)
        );
    }

    #[test]
    fn test_portion() {
        let basket = Money::from_major(300_000);
        assert_eq!(basket.portion(Decimal::new(5, 2)), Money::from_major(15_000));
        assert_eq!(basket.portion(Decimal::ZERO), Money::zero());
    }

    #[test]
    fn test_saturates_instead_of_panicking() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.multiply_quantity(i64::MAX), Money::new(Decimal::MAX));
        assert_eq!(huge + huge, Money::new(Decimal::MAX));
    }

    #[test]
    fn test_zero() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(0).is_zero());
        assert!(!Money::from_cents(-100).is_zero());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "\"10.99\"");
    }
}
