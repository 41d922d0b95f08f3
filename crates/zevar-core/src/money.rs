//! # Money Module
//!
//! Provides the `Money` type for rupee amounts held as integer paise.
//!
//! ## Where Floats Are Allowed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STORAGE / WIRE / DISPLAY            TAX COMPUTATION                    │
//! │  ─────────────────────────           ─────────────────────────          │
//! │  Money(i64 paise)                    f64 rupees, rounded to 2 dp        │
//! │  products.unit_price_cents           after every single step            │
//! │  invoices.grand_total_cents                                             │
//! │            │                                   ▲                        │
//! │            └──── to_major() ───────────────────┘                        │
//! │            ┌──── from_major_rounded() ◄────────┘                        │
//! │            ▼                                                            │
//! │  Money(i64 paise)                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The invoice calculator works in double precision and rounds half away
//! from zero at each step (see [`crate::cart::compute_totals`]). Everything
//! that leaves the calculator is converted back to paise, so stored and
//! displayed amounts are always exact.
//!
//! ## Usage
//! ```rust
//! use zevar_core::money::{parse_amount, Money};
//!
//! let price = Money::from_cents(129_950); // ₹1,299.50
//! assert_eq!(price.to_string(), "₹1,299.50");
//!
//! // Free-text prices from the catalogue are cleaned before parsing
//! assert_eq!(parse_amount("₹1,299.50"), price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative stock corrections and refunds stay representable
/// - **Single field tuple struct**: serializes as a plain integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use zevar_core::money::Money;
    ///
    /// let price = Money::from_cents(99_900); // ₹999.00
    /// assert_eq!(price.cents(), 99_900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Converts a rupee amount to paise, rounding half away from zero.
    ///
    /// This is the only way a float becomes `Money`. Non-finite input maps
    /// to zero.
    ///
    /// ## Example
    /// ```rust
    /// use zevar_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_rounded(1941.7475).cents(), 194_175);
    /// assert_eq!(Money::from_major_rounded(-0.005).cents(), -1);
    /// ```
    pub fn from_major_rounded(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in rupees as a double.
    ///
    /// `paise / 100` is correctly rounded, so for any two-decimal amount this
    /// yields the same double as parsing the decimal string directly.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats the amount with Indian digit grouping and no currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use zevar_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123_456_789).format_grouped(), "12,34,567.89");
    /// assert_eq!(Money::from_cents(-55_000).format_grouped(), "-550.00");
    /// ```
    pub fn format_grouped(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rupees = self.0.unsigned_abs() / 100;
        format!(
            "{}{}.{:02}",
            sign,
            group_indian(rupees),
            self.paise_part()
        )
    }
}

/// Groups digits the Indian way: last three digits, then pairs.
///
/// `1234567` → `12,34,567`
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a free-text price into Money.
///
/// Every character that is not an ASCII digit or `.` is dropped first, so
/// currency symbols, grouping commas and stray spaces are tolerated. An empty
/// or unparseable remainder yields zero rather than an error; catalogue
/// entries with garbage prices show up as ₹0.00 on the bill instead of
/// blocking the scan.
///
/// ## Example
/// ```rust
/// use zevar_core::money::{parse_amount, Money};
///
/// assert_eq!(parse_amount("INR 2,499"), Money::from_rupees(2499));
/// // A dot in the symbol survives the filter: "Rs. 20" reads as ".20"
/// assert_eq!(parse_amount("Rs. 20"), Money::from_cents(20));
/// assert_eq!(parse_amount("1.2.3"), Money::zero());
/// assert_eq!(parse_amount(""), Money::zero());
/// ```
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) => Money::from_major_rounded(value),
        Err(_) => Money::zero(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `₹12,34,567.89` (en-IN style).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            group_indian(self.0.unsigned_abs() / 100),
            self.paise_part()
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        let money = Money::from_cents(99_950);
        assert_eq!(money.cents(), 99_950);
        assert_eq!(money.rupees(), 999);
        assert_eq!(money.paise_part(), 50);
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_cents(0).to_string(), "₹0.00");
        assert_eq!(Money::from_cents(99_900).to_string(), "₹999.00");
        assert_eq!(Money::from_cents(100_000).to_string(), "₹1,000.00");
        assert_eq!(Money::from_cents(12_345_600).to_string(), "₹1,23,456.00");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "₹12,34,567.89");
        assert_eq!(Money::from_cents(-55_050).to_string(), "-₹550.50");
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(7), "7");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(10000), "10,000");
        assert_eq!(group_indian(100000), "1,00,000");
        assert_eq!(group_indian(10000000), "1,00,00,000");
    }

    #[test]
    fn test_from_major_rounded_half_away_from_zero() {
        assert_eq!(Money::from_major_rounded(29.12625).cents(), 2913);
        assert_eq!(Money::from_major_rounded(0.125).cents(), 13);
        assert_eq!(Money::from_major_rounded(-0.125).cents(), -13);
        assert_eq!(Money::from_major_rounded(f64::NAN).cents(), 0);
        assert_eq!(Money::from_major_rounded(f64::INFINITY).cents(), 0);
    }

    #[test]
    fn test_to_major_matches_decimal_literal() {
        assert_eq!(Money::from_cents(99_999).to_major(), 999.99);
        assert_eq!(Money::from_cents(10).to_major(), 0.1);
        assert_eq!(Money::from_cents(194_175).to_major(), 1941.75);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1299.50").cents(), 129_950);
        assert_eq!(parse_amount("₹1,299.50").cents(), 129_950);
        assert_eq!(parse_amount(" 45 ").cents(), 4_500);
        assert_eq!(parse_amount("abc").cents(), 0);
        assert_eq!(parse_amount(".").cents(), 0);
        assert_eq!(parse_amount("-20").cents(), 2_000); // sign is stripped
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(a.multiply_quantity(2).cents(), 2000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 1500);
    }
}
