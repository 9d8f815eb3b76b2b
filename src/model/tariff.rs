//! Duration-based billing.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::Money;

/// `max(0, whole_minutes - free_minutes) * rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub free_minutes: u64,
    pub rate_per_minute: Money,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            free_minutes: 30,
            rate_per_minute: Money::from_cents(15),
        }
    }
}

impl Tariff {
    /// Whole minutes in `duration`, rounded down. Negative durations count as zero.
    pub fn whole_minutes(duration: TimeDelta) -> u64 {
        u64::try_from(duration.num_milliseconds() / 60_000).unwrap_or(0)
    }

    pub fn cost(&self, duration: TimeDelta) -> Money {
        let billable = Self::whole_minutes(duration).saturating_sub(self.free_minutes);
        self.rate_per_minute.saturating_mul(billable)
    }
}
