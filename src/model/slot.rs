//! Docking slots and their unlock codes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

use super::BikeId;

/// The 4-digit code that releases the bike docked in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// How many distinct codes [`Password::generate`] can produce.
    pub const CODE_SPACE: usize = 9000;

    pub fn generate(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(1000..=9999).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Password {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl Display for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Empty,
    Occupied,
    Faulty,
}

/// What a slot holds. A bike and its password only exist together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotState {
    Empty,
    Occupied { bike: BikeId, password: Password },
    Faulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("Slot {0} is already occupied")]
    AlreadyOccupied(u32),
    #[error("Slot {0} is out of service")]
    Faulty(u32),
    #[error("Slot {0} holds no bike")]
    NotOccupied(u32),
    #[error("Wrong password for slot {0}")]
    InvalidPassword(u32),
}

/// One docking point. Slot numbers are fixed when the station is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    slot_number: u32,
    #[serde(flatten)]
    state: SlotState,
}

impl Slot {
    pub fn new(slot_number: u32) -> Self {
        Self {
            slot_number,
            state: SlotState::Empty,
        }
    }

    pub fn number(&self) -> u32 {
        self.slot_number
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Empty => SlotStatus::Empty,
            SlotState::Occupied { .. } => SlotStatus::Occupied,
            SlotState::Faulty => SlotStatus::Faulty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SlotState::Empty)
    }

    pub fn bike(&self) -> Option<&BikeId> {
        match &self.state {
            SlotState::Occupied { bike, .. } => Some(bike),
            _ => None,
        }
    }

    pub fn password(&self) -> Option<&Password> {
        match &self.state {
            SlotState::Occupied { password, .. } => Some(password),
            _ => None,
        }
    }

    /// Docks `bike` behind `password`. Only an empty, working slot accepts a bike.
    pub fn lock_bike(&mut self, bike: BikeId, password: Password) -> Result<(), SlotError> {
        match self.state {
            SlotState::Empty => {
                self.state = SlotState::Occupied { bike, password };
                Ok(())
            }
            SlotState::Occupied { .. } => Err(SlotError::AlreadyOccupied(self.slot_number)),
            SlotState::Faulty => Err(SlotError::Faulty(self.slot_number)),
        }
    }

    /// Exact match against the current code; always false for an empty slot.
    pub fn validate_password(&self, candidate: &str) -> bool {
        self.password().is_some_and(|p| p.as_str() == candidate)
    }

    /// Releases the docked bike. The password is consumed with it.
    pub fn unlock_bike(&mut self, candidate: &str) -> Result<BikeId, SlotError> {
        if !self.validate_password(candidate) {
            return Err(match self.state {
                SlotState::Occupied { .. } => SlotError::InvalidPassword(self.slot_number),
                _ => SlotError::NotOccupied(self.slot_number),
            });
        }
        match std::mem::replace(&mut self.state, SlotState::Empty) {
            SlotState::Occupied { bike, .. } => Ok(bike),
            other => {
                self.state = other;
                Err(SlotError::NotOccupied(self.slot_number))
            }
        }
    }

    /// Takes the slot out of service. A slot with a bike in it has to be emptied first.
    pub fn mark_faulty(&mut self) -> Result<(), SlotError> {
        if let SlotState::Occupied { .. } = self.state {
            return Err(SlotError::AlreadyOccupied(self.slot_number));
        }
        self.state = SlotState::Faulty;
        Ok(())
    }

    /// Faulty -> Empty; other states are left alone.
    pub fn repair(&mut self) {
        if let SlotState::Faulty = self.state {
            self.state = SlotState::Empty;
        }
    }
}
