//! Error types for the Account actor.

use thiserror::Error;

use crate::model::{MemberId, Money};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Member id already registered: {0}")]
    DuplicateMember(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid registration: {0}")]
    InvalidRegistration(&'static str),

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Insufficient balance: {balance} available, {required} required")]
    InsufficientBalance { balance: Money, required: Money },

    #[error("Member {0} already has a rental in progress")]
    AlreadyRenting(MemberId),

    #[error("Member {0} has no active rental")]
    NoActiveRental(MemberId),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AccountError {
    fn from(msg: String) -> Self {
        AccountError::ActorCommunicationError(msg)
    }
}
