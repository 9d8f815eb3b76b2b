//! Error types for the Station actor.

use thiserror::Error;

use crate::model::{BikeId, SlotError};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StationError {
    #[error("Station not found: {0}")]
    NotFound(String),

    #[error("Station name must not be blank")]
    EmptyName,

    #[error("Station name already in use: {0}")]
    DuplicateName(String),

    #[error("Invalid slot count: {0}")]
    InvalidSlotCount(u32),

    #[error("Too many slots: requested {count}, maximum {max}")]
    TooManySlots { count: u32, max: u32 },

    #[error("Slot not found: {0}")]
    SlotNotFound(u32),

    #[error("Slot {0} is not empty")]
    SlotNotEmpty(u32),

    #[error("Slot {0} is out of service")]
    SlotFaulty(u32),

    #[error("No slot matches the password")]
    NoMatchingSlot,

    #[error("No empty slot available")]
    NoEmptySlot,

    #[error("Slot {slot} does not hold bike {expected}")]
    UnexpectedBike { slot: u32, expected: BikeId },

    #[error("Every unlock code is in use")]
    CodesExhausted,

    #[error("Bike {bike} is already docked in slot {slot}")]
    BikeAlreadyDocked { bike: BikeId, slot: u32 },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StationError {
    fn from(msg: String) -> Self {
        StationError::ActorCommunicationError(msg)
    }
}

impl From<SlotError> for StationError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::AlreadyOccupied(slot) => StationError::SlotNotEmpty(slot),
            SlotError::Faulty(slot) => StationError::SlotFaulty(slot),
            SlotError::NotOccupied(_) | SlotError::InvalidPassword(_) => {
                StationError::NoMatchingSlot
            }
        }
    }
}
