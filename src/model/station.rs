/// A docking station: a named, addressed row of numbered slots.
///
/// # Actor Framework
/// Managed by the station actor ([`crate::station_actor`]), keyed by [`StationName`]. Every
/// slot operation below runs inside that actor, so lock and unlock on one station never
/// interleave.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{BikeId, Password, Slot, SlotStatus, StationName};
use crate::station_actor::StationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: StationName,
    pub address: String,
    slots: Vec<Slot>,
}

impl Station {
    /// Hard ceiling on slots per station. Each docked bike needs its own code.
    pub const MAX_SLOTS: u32 = Password::CODE_SPACE as u32;

    /// Builds a station with slots numbered `1..=slot_count`, all empty.
    ///
    /// The count is validated before any slot is allocated.
    pub fn new(
        name: StationName,
        address: impl Into<String>,
        slot_count: u32,
    ) -> Result<Self, StationError> {
        if name.0.trim().is_empty() {
            return Err(StationError::EmptyName);
        }
        if slot_count == 0 {
            return Err(StationError::InvalidSlotCount(slot_count));
        }
        if slot_count > Self::MAX_SLOTS {
            return Err(StationError::TooManySlots {
                count: slot_count,
                max: Self::MAX_SLOTS,
            });
        }
        Ok(Self {
            name,
            address: address.into(),
            slots: (1..=slot_count).map(Slot::new).collect(),
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, number: u32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.number() == number)
    }

    fn slot_mut(&mut self, number: u32) -> Result<&mut Slot, StationError> {
        self.slots
            .iter_mut()
            .find(|s| s.number() == number)
            .ok_or(StationError::SlotNotFound(number))
    }

    /// Docks `bike` in slot `number` and returns the code that releases it.
    pub fn lock_bike_in_slot(
        &mut self,
        number: u32,
        bike: BikeId,
        rng: &mut impl Rng,
    ) -> Result<Password, StationError> {
        self.lock_with_fresh_code(number, bike, None, rng)
    }

    fn lock_with_fresh_code(
        &mut self,
        number: u32,
        bike: BikeId,
        retired: Option<&Password>,
        rng: &mut impl Rng,
    ) -> Result<Password, StationError> {
        if let Some(held_by) = self.slot_holding(&bike) {
            return Err(StationError::BikeAlreadyDocked { bike, slot: held_by });
        }
        match self.slot(number).map(Slot::status) {
            None => return Err(StationError::SlotNotFound(number)),
            Some(SlotStatus::Occupied) => return Err(StationError::SlotNotEmpty(number)),
            Some(SlotStatus::Faulty) => return Err(StationError::SlotFaulty(number)),
            Some(SlotStatus::Empty) => {}
        }
        let password = self.fresh_password(retired, rng)?;
        self.slot_mut(number)?.lock_bike(bike, password.clone())?;
        Ok(password)
    }

    /// Releases `expected` from the slot whose code is `password`. First matching slot
    /// wins; a slot holding any other bike is left locked.
    pub fn unlock_bike_from_slot(
        &mut self,
        password: &str,
        expected: &BikeId,
    ) -> Result<u32, StationError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.validate_password(password))
            .ok_or(StationError::NoMatchingSlot)?;
        if slot.bike() != Some(expected) {
            return Err(StationError::UnexpectedBike {
                slot: slot.number(),
                expected: expected.clone(),
            });
        }
        slot.unlock_bike(password)?;
        Ok(slot.number())
    }

    /// Which bike `password` would release, without releasing it.
    pub fn find_bike_by_password(&self, password: &str) -> Option<(u32, &BikeId)> {
        self.slots
            .iter()
            .find(|s| s.validate_password(password))
            .and_then(|s| s.bike().map(|bike| (s.number(), bike)))
    }

    /// First empty working slot in slot-number order.
    pub fn find_empty_slot(&self) -> Option<&Slot> {
        self.slots.iter().find(|s| s.is_empty())
    }

    /// Return path: docks `bike` in [`Station::find_empty_slot`]. The new code never
    /// equals `retired`, the code the bike was last unlocked with.
    pub fn dock_in_first_empty_slot(
        &mut self,
        bike: BikeId,
        retired: Option<&Password>,
        rng: &mut impl Rng,
    ) -> Result<(u32, Password), StationError> {
        let number = self
            .find_empty_slot()
            .map(Slot::number)
            .ok_or(StationError::NoEmptySlot)?;
        let password = self.lock_with_fresh_code(number, bike, retired, rng)?;
        Ok((number, password))
    }

    pub fn slot_holding(&self, bike: &BikeId) -> Option<u32> {
        self.slots
            .iter()
            .find(|s| s.bike() == Some(bike))
            .map(Slot::number)
    }

    pub fn empty_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }

    pub fn docked_bikes(&self) -> impl Iterator<Item = &BikeId> {
        self.slots.iter().filter_map(Slot::bike)
    }

    pub fn mark_slot_faulty(&mut self, number: u32) -> Result<(), StationError> {
        self.slot_mut(number)?.mark_faulty()?;
        Ok(())
    }

    pub fn repair_slot(&mut self, number: u32) -> Result<(), StationError> {
        self.slot_mut(number)?.repair();
        Ok(())
    }

    // Codes are unique within a station so an unlock can never match two slots.
    fn fresh_password(
        &self,
        retired: Option<&Password>,
        rng: &mut impl Rng,
    ) -> Result<Password, StationError> {
        let taken: HashSet<&Password> = self
            .slots
            .iter()
            .filter_map(Slot::password)
            .chain(retired)
            .collect();
        if taken.len() >= Password::CODE_SPACE {
            return Err(StationError::CodesExhausted);
        }
        loop {
            let candidate = Password::generate(rng);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

/// DTOs for Station creation and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCreate {
    pub name: StationName,
    pub address: String,
    pub slot_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationUpdate {
    pub address: Option<String>,
}
