use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A non-negative amount read off a receipt.
///
/// The inner value keeps whatever precision it was parsed or summed with;
/// rounding to cents only happens when the amount is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal)
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Best-effort parse of an OCR numeral such as `1,234.56`, `$45` or `US$ 3.00`.
    ///
    /// Thousands separators, currency markers and stray whitespace are dropped
    /// before parsing. Anything that still fails to parse becomes zero.
    pub fn parse_lenient(raw: &str) -> Self {
        let clean: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if clean.is_empty() {
            return Money::zero();
        }
        Decimal::from_str(&clean)
            .map(Money)
            .unwrap_or_else(|_| Money::zero())
    }

    /// Value rounded to cents, half away from zero.
    pub fn rounded(self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Two-decimal rendering without a currency symbol, e.g. `45.00`.
    pub fn to_fixed(self) -> String {
        format!("{:.2}", self.rounded())
    }

    /// Two-decimal rendering prefixed with `symbol`, e.g. `US$45.00`.
    pub fn format_with(self, symbol: &str) -> String {
        format!("{symbol}{}", self.to_fixed())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_fixed())
    }
}

/// Saturates at `Decimal::MAX`; a run of OCR digits must not abort a sum.
impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}
