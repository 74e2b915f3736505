//! Monetary amounts in minor currency units.

use core::iter::Sum;
use core::ops::Add;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A currency the till can display amounts in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    code: &'static str,
    symbol: &'static str,
}

impl Currency {
    pub const INR: Currency = Currency { code: "INR", symbol: "₹" };
    pub const USD: Currency = Currency { code: "USD", symbol: "$" };
    pub const EUR: Currency = Currency { code: "EUR", symbol: "€" };
    pub const GBP: Currency = Currency { code: "GBP", symbol: "£" };

    const KNOWN: [Currency; 4] = [Self::INR, Self::USD, Self::EUR, Self::GBP];

    /// Look up a built-in currency by ISO code (case-insensitive).
    pub fn from_code(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        Self::KNOWN
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::validation(format!("unsupported currency: {code}")))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::INR
    }
}

impl ValueObject for Currency {}

/// Amount of money in the smallest currency unit (e.g. paise, cents).
///
/// `times` and `+` saturate instead of wrapping. Sale totals go through
/// [`Money::checked_times`] and [`Money::checked_add`] so they are never clipped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Whole units, e.g. `from_major(24)` is 24.00.
    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(100))
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units at this unit price.
    pub const fn times(self, quantity: u64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }

    /// `None` when the product does not fit in a `u64` of minor units.
    pub const fn checked_times(self, quantity: u64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    pub const fn checked_add(self, rhs: Money) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Integer division used for averages; zero divisor yields zero.
    pub const fn div_floor(self, divisor: u64) -> Self {
        match self.0.checked_div(divisor) {
            Some(v) => Self(v),
            None => Self::ZERO,
        }
    }

    /// Symbol-prefixed amount with two decimals, e.g. `₹344.00`.
    pub fn format(self, currency: &Currency) -> String {
        format!("{}{}", currency.symbol(), self)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl ValueObject for Money {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::from_major(24).to_string(), "24.00");
        assert_eq!(Money::from_minor(2_550).to_string(), "25.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn format_prefixes_currency_symbol() {
        assert_eq!(Money::from_major(344).format(&Currency::INR), "₹344.00");
        assert_eq!(Money::from_minor(1_999).format(&Currency::USD), "$19.99");
    }

    #[test]
    fn times_and_sum() {
        let total: Money = [Money::from_major(24).times(2), Money::from_major(45)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(93));
    }

    #[test]
    fn arithmetic_saturates() {
        let big = Money::from_minor(u64::MAX);
        assert_eq!(big.times(2), big);
        assert_eq!(big + Money::from_minor(1), big);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let price = Money::from_major(24);
        let max_qty = u64::MAX / price.minor();

        assert_eq!(price.checked_times(max_qty), Some(Money::from_minor(price.minor() * max_qty)));
        assert_eq!(price.checked_times(max_qty + 1), None);
        assert_eq!(Money::from_minor(u64::MAX).checked_add(Money::from_minor(1)), None);
        assert_eq!(
            Money::from_major(24).checked_add(Money::from_major(45)),
            Some(Money::from_major(69))
        );
    }

    #[test]
    fn div_floor_by_zero_is_zero() {
        assert_eq!(Money::from_major(10).div_floor(0), Money::ZERO);
        assert_eq!(Money::from_minor(1_001).div_floor(2), Money::from_minor(500));
    }

    #[test]
    fn currency_lookup_is_case_insensitive() {
        assert_eq!(Currency::from_code("inr").unwrap(), Currency::INR);
        assert_eq!(Currency::from_code(" GBP ").unwrap().symbol(), "£");
        assert!(matches!(
            Currency::from_code("XYZ"),
            Err(DomainError::Validation(_))
        ));
    }
}
