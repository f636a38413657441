//! Prices in the smallest currency unit.
//!
//! The shop sells in naira and writes amounts as `#5,000`: a `#` marker
//! followed by the whole amount with comma thousands separators. Amounts are
//! integers, so totals never need rounding.

use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// Marker printed before every displayed amount.
pub const CURRENCY_MARKER: char = '#';

/// A non-negative price in the smallest currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Line price for `quantity` units. Saturates instead of wrapping.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// The amount with `,` between every group of three digits, without the
    /// currency marker (e.g. `10,000`).
    #[must_use]
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;

        for (i, ch) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - lead) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_MARKER}{}", self.grouped())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}
