//! Monetary amounts as integer cents.
//!
//! All pricing math in RideGear happens in whole cents to keep cart and
//! order totals exact. `rust_decimal` is only brought in at the edges where
//! a percentage has to be applied and rounded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in cents (USD).
///
/// Display formats as dollars: `Money::from_cents(1999)` renders `$19.99`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// Create an amount from cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract, clamping at zero. Used for `total = max(0, ... - discount)`.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        let result = self.0 - other.0;
        if result < 0 { Self(0) } else { Self(result) }
    }

    /// Multiply a unit price by a quantity.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Take a whole-number percentage, truncating fractional cents.
    ///
    /// Tax uses this: 8% of 11998 cents is 959.84, charged as 959.
    #[must_use]
    pub const fn percent_truncated(self, percent: i64) -> Self {
        Self(self.0 * percent / 100)
    }

    /// Take a (possibly fractional) percentage, rounding half away from zero.
    ///
    /// Percent coupons use this: 20% of 10000 cents is exactly 2000; 12.5%
    /// of 999 cents is 124.875, discounted as 125.
    #[must_use]
    pub fn percent_rounded(self, percent: Decimal) -> Self {
        let cents = (Decimal::from(self.0) * percent / Decimal::from(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX);
        Self(cents)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn displays_as_dollars() {
        assert_eq!(Money::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn percent_truncated_drops_fractional_cents() {
        // 8% of 11998 = 959.84 -> 959
        assert_eq!(
            Money::from_cents(11998).percent_truncated(8),
            Money::from_cents(959)
        );
    }

    #[test]
    fn percent_rounded_rounds_half_away_from_zero() {
        assert_eq!(
            Money::from_cents(10000).percent_rounded(Decimal::from(20)),
            Money::from_cents(2000)
        );
        // 12.5% of 999 = 124.875 -> 125
        assert_eq!(
            Money::from_cents(999).percent_rounded(Decimal::new(125, 1)),
            Money::from_cents(125)
        );
    }

    #[test]
    fn saturating_sub_clamps_at_zero() {
        assert_eq!(
            Money::from_cents(500).saturating_sub(Money::from_cents(800)),
            Money::ZERO
        );
    }

    #[test]
    fn sums_line_totals() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(350));
    }
}
