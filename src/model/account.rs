//! Members and their prepaid accounts.
//!
//! An account moves through [`RentalState`] as its holder rents and returns bikes. The
//! transitions are the only way to attach or detach a rental, and they are what keeps an
//! account at one active rental at most.

use serde::{Deserialize, Serialize};

use super::{MemberId, Money, RentalId};
use crate::account_actor::AccountError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
}

/// Where an account stands in the rent/return cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RentalState {
    Idle,
    /// A rent is in flight; no second rent can start until it completes or is released.
    Pending,
    Active { rental: RentalId },
    /// The rental cost is held while the bike is being docked.
    Returning { rental: RentalId, hold: Money },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user: User,
    balance: Money,
    state: RentalState,
    history: Vec<RentalId>,
}

impl Account {
    pub fn new(user: User, balance: Money) -> Self {
        Self {
            user,
            balance,
            state: RentalState::Idle,
            history: Vec::new(),
        }
    }

    pub fn member_id(&self) -> &MemberId {
        &self.user.member_id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn state(&self) -> RentalState {
        self.state
    }

    /// Closed rentals, oldest first.
    pub fn rental_history(&self) -> &[RentalId] {
        &self.history
    }

    pub fn has_active_rental(&self) -> bool {
        self.active_rental().is_some()
    }

    pub fn active_rental(&self) -> Option<RentalId> {
        match self.state {
            RentalState::Active { rental } | RentalState::Returning { rental, .. } => Some(rental),
            RentalState::Idle | RentalState::Pending => None,
        }
    }

    pub fn add_funds(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Debits `amount` only if the balance covers it. Returns whether it did.
    pub fn deduct_funds(&mut self, amount: Money) -> bool {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }

    /// Idle -> Pending.
    pub fn claim_rental(&mut self) -> Result<(), AccountError> {
        match self.state {
            RentalState::Idle => {
                self.state = RentalState::Pending;
                Ok(())
            }
            _ => Err(AccountError::AlreadyRenting(self.member_id().clone())),
        }
    }

    /// Pending -> Idle. No effect in any other state.
    pub fn release_claim(&mut self) {
        if self.state == RentalState::Pending {
            self.state = RentalState::Idle;
        }
    }

    pub fn start_rental(&mut self, rental: RentalId) -> Result<(), AccountError> {
        match self.state {
            RentalState::Idle | RentalState::Pending => {
                self.state = RentalState::Active { rental };
                Ok(())
            }
            _ => Err(AccountError::AlreadyRenting(self.member_id().clone())),
        }
    }

    /// Active -> Returning, holding `cost` from the balance. Returns the balance left.
    pub fn begin_return(&mut self, rental: RentalId, cost: Money) -> Result<Money, AccountError> {
        match self.state {
            RentalState::Active { rental: active } if active == rental => {}
            _ => return Err(AccountError::NoActiveRental(self.member_id().clone())),
        }
        if !self.deduct_funds(cost) {
            return Err(AccountError::InsufficientBalance {
                balance: self.balance,
                required: cost,
            });
        }
        self.state = RentalState::Returning { rental, hold: cost };
        Ok(self.balance)
    }

    /// Returning -> Active, refunding the hold. Returns the balance.
    pub fn abort_return(&mut self) -> Money {
        if let RentalState::Returning { rental, hold } = self.state {
            self.balance += hold;
            self.state = RentalState::Active { rental };
        }
        self.balance
    }

    /// Active or Returning -> Idle; the rental moves into the history.
    pub fn end_rental(&mut self) -> Result<RentalId, AccountError> {
        let rental = self
            .active_rental()
            .ok_or_else(|| AccountError::NoActiveRental(self.member_id().clone()))?;
        self.history.push(rental);
        self.state = RentalState::Idle;
        Ok(rental)
    }
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreate {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub initial_balance: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}
