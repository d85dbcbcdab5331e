//! # Money Module
//!
//! Provides the `Money` type for prices, line totals and the cart total.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices:                                                  │
//! │    9.99 + 4.99 + 0.01 = 14.990000000000002                              │
//! │                                                                         │
//! │  The cart page shows cartTotal to two decimals, and the total must     │
//! │  equal the sum of the displayed line totals exactly.                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    999 + 499 + 1 = 1499 cents → "$14.99"                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shoptoshop_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 2u32;             // $21.98
//! assert_eq!(line.to_string(), "$21.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartEntry.line_total ──► Session.cart_total
///       │                                           │
///       └──► "$10.99" on the product card           └──► "Subtotal" / "Total"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use shoptoshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a cart quantity, saturating at the `i64`
    /// bounds.
    ///
    /// ```rust
    /// use shoptoshop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Percentage saved when this price replaces `original`, rounded to the
    /// nearest whole percent.
    ///
    /// Returns `None` when `original` is not above this price, which is how
    /// sale badges decide whether to render.
    ///
    /// ```rust
    /// use shoptoshop_core::money::Money;
    ///
    /// let sale = Money::from_cents(7499);
    /// let original = Money::from_cents(9999);
    /// assert_eq!(sale.percent_off(original), Some(25));
    /// ```
    pub fn percent_off(&self, original: Money) -> Option<u8> {
        if original.0 <= self.0 || original.0 <= 0 {
            return None;
        }
        // (saved * 100 + original / 2) / original rounds half up
        let saved = original.0 as i128 - self.0 as i128;
        let pct = (saved * 100 + original.0 as i128 / 2) / original.0 as i128;
        u8::try_from(pct).ok()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the storefront prints prices: `$10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3u32).cents(), 3000);
    }

    #[test]
    fn test_sum_of_line_totals() {
        let lines = [
            Money::from_cents(999),
            Money::from_cents(499),
            Money::from_cents(1),
        ];
        let total: Money = lines.iter().sum();
        assert_eq!(total.cents(), 1499);
        assert_eq!(total.to_string(), "$14.99");

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_percent_off() {
        let sale = Money::from_cents(7499);
        assert_eq!(sale.percent_off(Money::from_cents(9999)), Some(25));
        assert_eq!(
            Money::from_cents(2000).percent_off(Money::from_cents(3000)),
            Some(33)
        );
        assert_eq!(sale.percent_off(sale), None);
        assert_eq!(sale.percent_off(Money::from_cents(100)), None);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(4_611_686_018_427_387_904);

        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let total: Money = [huge * 3u32, huge, Money::from_cents(1)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
        assert_eq!(unit_price.multiply_quantity(0).cents(), 0);
    }
}
