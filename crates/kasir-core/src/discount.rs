//! # Discount Module
//!
//! Tiered basket discount.
//!
//! ## Standard Schedule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  basket price               rate                                        │
//! │  ─────────────────────────  ────                                        │
//! │  > 500000                   10%                                         │
//! │  300000 < price <= 500000    8%                                         │
//! │  200000 < price <= 300000    5%                                         │
//! │  <= 200000                   0%                                         │
//! │                                                                         │
//! │  Tiers are checked top-down, first match wins, thresholds are STRICT:  │
//! │  a basket of exactly 500000 gets 8%, not 10%.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount is `round(basket_price * rate, 2)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::validation::{validate_rate, ValidationResult};

/// One step of a discount schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Basket price must be strictly greater than this.
    pub threshold: Money,

    /// Fraction of the basket price taken off (0.08 = 8%).
    pub rate: Decimal,
}

impl DiscountTier {
    pub fn new(threshold: Money, rate: Decimal) -> Self {
        DiscountTier { threshold, rate }
    }
}

/// Ordered set of discount tiers, highest threshold first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountSchedule {
    tiers: Vec<DiscountTier>,
}

impl DiscountSchedule {
    /// Builds a schedule from tiers in any order.
    ///
    /// ## Rules
    /// - Every rate must be between 0 and 1
    /// - Tiers are sorted by threshold, highest first
    pub fn new(mut tiers: Vec<DiscountTier>) -> ValidationResult<Self> {
        for tier in &tiers {
            validate_rate("discount rate", tier.rate)?;
        }
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Ok(DiscountSchedule { tiers })
    }

    /// The standard 10% / 8% / 5% schedule.
    pub fn standard() -> Self {
        DiscountSchedule {
            tiers: vec![
                DiscountTier::new(Money::from_major(500_000), Decimal::new(10, 2)),
                DiscountTier::new(Money::from_major(300_000), Decimal::new(8, 2)),
                DiscountTier::new(Money::from_major(200_000), Decimal::new(5, 2)),
            ],
        }
    }

    /// Returns the tiers, highest threshold first.
    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// Returns the rate applied to `basket_price` (zero when no tier matches).
    pub fn rate_for(&self, basket_price: Money) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| basket_price > tier.threshold)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the discount amount for `basket_price`, rounded to 2 places.
    pub fn discount_for(&self, basket_price: Money) -> Money {
        basket_price.portion(self.rate_for(basket_price))
    }
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        DiscountSchedule::standard()
    }
}

/// Calculates the discount for a basket price using the standard schedule.
///
/// ## Example
/// ```rust
/// use kasir_core::{calc_discount, Money};
///
/// assert_eq!(calc_discount(Money::from_major(200_000)), Money::zero());
/// assert_eq!(calc_discount(Money::from_major(500_000)), Money::from_major(40_000));
/// ```
pub fn calc_discount(basket_price: Money) -> Money {
    DiscountSchedule::standard().discount_for(basket_price)
}

// =============================================================================
// Unit Tests
// =============================================================================
