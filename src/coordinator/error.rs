//! Error types for the coordinator's use cases.
//!
//! Every variant except `Internal` is a declined request with nothing changed. `Internal`
//! means an actor could not be reached.

use thiserror::Error;

use crate::model::{BikeId, MemberId, Money, StationName};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RentError {
    #[error("User not found: {0}")]
    UserNotFound(MemberId),

    #[error("Station not found: {0}")]
    StationNotFound(StationName),

    #[error("Member {0} already has an active rental")]
    AlreadyRented(MemberId),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Bike {0} is not available")]
    BikeUnavailable(BikeId),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReturnError {
    #[error("User not found: {0}")]
    UserNotFound(MemberId),

    #[error("Station not found: {0}")]
    StationNotFound(StationName),

    #[error("Member {0} has no active rental")]
    NoActiveRental(MemberId),

    #[error("No empty slot at {0}")]
    NoEmptySlot(StationName),

    #[error("Insufficient balance: {balance} available, {cost} due")]
    InsufficientBalance { balance: Money, cost: Money },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DockError {
    #[error("Station not found: {0}")]
    StationNotFound(StationName),

    #[error("Bike not found: {0}")]
    BikeNotFound(BikeId),

    #[error("Bike {0} is not available")]
    BikeUnavailable(BikeId),

    #[error("Bike {0} is already docked")]
    BikeAlreadyDocked(BikeId),

    #[error("Slot not found: {0}")]
    SlotNotFound(u32),

    #[error("Slot {0} is not empty")]
    SlotNotEmpty(u32),

    #[error("Slot {0} is out of service")]
    SlotFaulty(u32),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors of the read-only views.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("User not found: {0}")]
    UserNotFound(MemberId),

    #[error("Station not found: {0}")]
    StationNotFound(StationName),

    #[error("Internal error: {0}")]
    Internal(String),
}
