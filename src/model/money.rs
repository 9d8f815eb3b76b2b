//! Balance and tariff amounts.
//!
//! Amounts are whole cents so billing stays exact: 15 minutes at 0.15 is 225 cents,
//! never 2.2499999.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::{Add, AddAssign};

/// A non-negative amount of money in cents. Serialized as the integer cent count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `None` when `other` exceeds `self`; balances never go negative.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn saturating_mul(self, factor: u64) -> Money {
        Money(self.0.saturating_mul(factor))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Money::from_cents(225).to_string(), "2.25");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_units(10).to_string(), "10.00");
    }

    #[test]
    fn test_checked_sub_refuses_overdraft() {
        let balance = Money::from_cents(100);
        assert_eq!(balance.checked_sub(Money::from_cents(40)), Some(Money::from_cents(60)));
        assert_eq!(balance.checked_sub(Money::from_cents(101)), None);
    }

    #[test]
    fn test_large_unit_amounts_saturate() {
        assert_eq!(Money::from_units(u64::MAX), Money::from_cents(u64::MAX));
        assert_eq!(Money::from_units(u64::MAX / 100 + 1).cents(), u64::MAX);
    }
}
