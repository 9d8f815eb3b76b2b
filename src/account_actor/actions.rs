//! Custom actions for the Account actor.

use crate::model::{Money, RentalId};

#[derive(Debug, Clone)]
pub enum AccountAction {
    AddFunds(Money),
    DeductFunds(Money),
    /// Reserve the account for one rent attempt.
    ClaimRental,
    ReleaseClaim,
    StartRental(RentalId),
    /// Hold `cost` while the bike is docked.
    BeginReturn { rental: RentalId, cost: Money },
    AbortReturn,
    EndRental,
}

/// Results from AccountActions - variants match 1:1 with AccountAction.
/// Balance-changing actions report the balance afterwards.
#[derive(Debug, Clone)]
pub enum AccountActionResult {
    AddFunds(Money),
    DeductFunds(Money),
    ClaimRental(()),
    ReleaseClaim(()),
    StartRental(()),
    BeginReturn(Money),
    AbortReturn(Money),
    EndRental(RentalId),
}
