//! [`ActorEntity`] implementation for [`Account`].
//!
//! Registration is validated here: non-blank member id, name and email, an email that
//! looks like one, and an email no other account uses.

use actor_framework::ActorEntity;
use async_trait::async_trait;

use super::actions::{AccountAction, AccountActionResult};
use super::error::AccountError;
use super::registry::EmailRegistry;
use crate::model::{Account, AccountCreate, AccountUpdate, MemberId, User};

fn validate_email(email: &str) -> Result<(), AccountError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AccountError::InvalidRegistration("email must contain '@'")),
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<(), AccountError> {
    if value.trim().is_empty() {
        return Err(AccountError::InvalidRegistration(field));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Account {
    type Id = MemberId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = AccountActionResult;
    type Context = EmailRegistry;
    type Error = AccountError;

    fn assign_id(params: &AccountCreate, _sequence: u64) -> MemberId {
        params.member_id.clone()
    }

    fn from_create_params(member_id: MemberId, params: AccountCreate) -> Result<Self, AccountError> {
        non_blank(&member_id.0, "member id is required")?;
        non_blank(&params.name, "name is required")?;
        non_blank(&params.email, "email is required")?;
        validate_email(&params.email)?;

        let user = User {
            member_id,
            name: params.name,
            email: params.email,
        };
        Ok(Account::new(user, params.initial_balance))
    }

    async fn on_create(&mut self, emails: &EmailRegistry) -> Result<(), AccountError> {
        emails.claim(&self.user.email)
    }

    async fn on_update(
        &mut self,
        update: AccountUpdate,
        emails: &EmailRegistry,
    ) -> Result<(), AccountError> {
        if let Some(name) = &update.name {
            non_blank(name, "name is required")?;
        }
        if let Some(email) = &update.email {
            non_blank(email, "email is required")?;
            validate_email(email)?;
            emails.swap(&self.user.email, email)?;
        }

        if let Some(name) = update.name {
            self.user.name = name;
        }
        if let Some(email) = update.email {
            self.user.email = email;
        }
        Ok(())
    }

    async fn on_delete(&self, emails: &EmailRegistry) -> Result<(), AccountError> {
        if self.has_active_rental() {
            return Err(AccountError::AlreadyRenting(self.member_id().clone()));
        }
        emails.release(&self.user.email);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: AccountAction,
        _emails: &EmailRegistry,
    ) -> Result<AccountActionResult, AccountError> {
        match action {
            AccountAction::AddFunds(amount) => {
                if amount.is_zero() {
                    return Err(AccountError::InvalidAmount);
                }
                self.add_funds(amount);
                Ok(AccountActionResult::AddFunds(self.balance()))
            }
            AccountAction::DeductFunds(amount) => {
                if amount.is_zero() {
                    return Err(AccountError::InvalidAmount);
                }
                if !self.deduct_funds(amount) {
                    return Err(AccountError::InsufficientBalance {
                        balance: self.balance(),
                        required: amount,
                    });
                }
                Ok(AccountActionResult::DeductFunds(self.balance()))
            }
            AccountAction::ClaimRental => self.claim_rental().map(AccountActionResult::ClaimRental),
            AccountAction::ReleaseClaim => {
                self.release_claim();
                Ok(AccountActionResult::ReleaseClaim(()))
            }
            AccountAction::StartRental(rental) => self
                .start_rental(rental)
                .map(AccountActionResult::StartRental),
            AccountAction::BeginReturn { rental, cost } => self
                .begin_return(rental, cost)
                .map(AccountActionResult::BeginReturn),
            AccountAction::AbortReturn => Ok(AccountActionResult::AbortReturn(self.abort_return())),
            AccountAction::EndRental => self.end_rental().map(AccountActionResult::EndRental),
        }
    }
}
