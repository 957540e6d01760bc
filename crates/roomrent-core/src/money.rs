//! # Money Module
//!
//! Fixed-point amounts for rates, line amounts and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RATES AS FLOATS                                                        │
//! │                                                                         │
//! │  With f64 rates:                                                        │
//! │    1999.99 × 3 rooms × 7 nights summed line by line drifts by fractions │
//! │    of a paisa, and 18% of it rounds differently depending on order.     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Every rate, line amount and total is an i64 count of 1/100 units.    │
//! │    Sums are exact and order-independent; only GST rounds, once.         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use roomrent_core::money::Money;
//!
//! let rate = Money::from_cents(200_000); // 2000.00 per day
//! let amount = rate.multiply_quantity(3);
//! assert_eq!(amount.to_string(), "6000.00");
//!
//! // Parsing form text never goes through a float
//! assert_eq!(Money::parse_decimal("1999.5"), Some(Money::from_cents(199_950)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use crate::types::TaxRate;

/// Digits accepted before the decimal point when parsing.
const MAX_WHOLE_DIGITS: usize = 15;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Newtype**: no accidental mixing with day counts or basis points
/// - **Display**: plain `1234.56`; the currency symbol is a presentation
///   concern handled by [`Money::format_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Wraps an amount already expressed in paise.
    ///
    /// ```rust
    /// use roomrent_core::money::Money;
    ///
    /// let rate = Money::from_cents(150_050); // 1500.50
    /// assert_eq!(rate.cents(), 150_050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses decimal text such as `2000`, `2000.5` or `2000.50`.
    ///
    /// ## Rules
    /// - Digits with an optional single `.` and at most two decimals
    /// - No sign: rates are never negative
    /// - Surrounding whitespace is ignored
    ///
    /// Returns `None` for anything else; callers attach the field name.
    ///
    /// ```rust
    /// use roomrent_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("2000"), Some(Money::from_cents(200_000)));
    /// assert_eq!(Money::parse_decimal(".75"), Some(Money::from_cents(75)));
    /// assert_eq!(Money::parse_decimal("-5"), None);
    /// assert_eq!(Money::parse_decimal("12.345"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let text = text.trim();
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if whole.len() > MAX_WHOLE_DIGITS || frac.len() > 2 {
            return None;
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return None;
        }

        let whole_val: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let frac_val: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        Some(Money(whole_val * 100 + frac_val))
    }

    /// Amount in paise.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole rupees, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Paise part, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True for amounts below zero. Rates are never negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Tax on this amount at `rate`, rounded half up to the paisa.
    ///
    /// ## Implementation
    /// Integer math only: `(amount × bps + 5000) / 10000`.
    /// The +5000 is the half-cent that makes 0.5 round up.
    ///
    /// ## Example
    /// ```rust
    /// use roomrent_core::money::Money;
    /// use roomrent_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(600_000); // 6000.00
    /// let gst = subtotal.calculate_tax(TaxRate::from_bps(1800));
    /// assert_eq!(gst.cents(), 108_000); // 1080.00
    ///
    /// // 0.03 at 18% = 0.0054 → 0.01
    /// assert_eq!(Money::from_cents(3).calculate_tax(TaxRate::from_bps(1800)).cents(), 1);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large subtotals from overflowing mid-calculation
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money((scaled + 5_000).div_euclid(10_000) as i64)
    }

    /// This amount repeated `count` times, e.g. a daily rate over a stay.
    #[inline]
    pub const fn multiply_quantity(&self, count: i64) -> Self {
        Money(self.0 * count)
    }

    /// Formats with a currency symbol in front: `Rs.6000.00`.
    ///
    /// ```rust
    /// use roomrent_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("Rs."), "-Rs.5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.major().abs(), self.minor());
        // pad() so callers can right-align with `{:>12}`
        f.pad(&text)
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
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, days: i64) -> Self {
        Money(self.0 * days)
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
    fn test_rupees_and_paise() {
        let rate = Money::from_cents(150_075);
        assert_eq!(rate.major(), 1500);
        assert_eq!(rate.minor(), 75);

        let refund = Money::from_cents(-550);
        assert_eq!((refund.major(), refund.minor()), (-5, 50));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(708_000).to_string(), "7080.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(format!("{:>10}", Money::from_cents(100)), "      1.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("2000.00"), Some(Money::from_cents(200_000)));
        assert_eq!(Money::parse_decimal(" 2000 "), Some(Money::from_cents(200_000)));
        assert_eq!(Money::parse_decimal("2000."), Some(Money::from_cents(200_000)));
        assert_eq!(Money::parse_decimal("0.5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("0"), Some(Money::zero()));

        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal("-100"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("9999999999999999"), None);
    }

    #[test]
    fn test_tax_calculation_gst() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(Money::from_cents(600_000).calculate_tax(rate).cents(), 108_000);
        // 0.25 × 18% = 0.045 → rounds up to 0.05
        assert_eq!(Money::from_cents(25).calculate_tax(rate).cents(), 5);
        // 0.02 × 18% = 0.0036 → 0.00
        assert_eq!(Money::from_cents(2).calculate_tax(rate).cents(), 0);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let ac = Money::from_cents(200_000);
        let non_ac = Money::from_cents(120_050);
        assert_eq!((ac + non_ac).cents(), 320_050);
        assert_eq!((ac - non_ac).cents(), 79_950);
        assert_eq!((non_ac * 4).cents(), 480_200);

        let owned: Money = vec![ac, non_ac].into_iter().sum();
        let borrowed: Money = [ac, non_ac, non_ac].iter().sum();
        assert_eq!(owned.cents(), 320_050);
        assert_eq!(borrowed.cents(), 440_100);
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(708_000).format_with("Rs."), "Rs.7080.00");
        assert_eq!(Money::zero().format_with("Rs."), "Rs.0.00");
    }
}
