//! Custom actions for the Station actor.

use crate::model::{BikeId, Password};

#[derive(Debug, Clone)]
pub enum StationAction {
    /// Docks a bike in a specific slot and issues its unlock code.
    LockBike { slot: u32, bike: BikeId },
    /// Releases `bike` from the slot whose code matches. Any other bike stays locked.
    UnlockBike { password: Password, bike: BikeId },
    /// Read-only: which slot and bike a code belongs to.
    FindByPassword { password: Password },
    /// Return path: first empty working slot, with a code other than `retired`.
    DockInEmptySlot {
        bike: BikeId,
        retired: Option<Password>,
    },
    MarkSlotFaulty { slot: u32 },
    RepairSlot { slot: u32 },
}

/// Results from StationActions - variants match 1:1 with StationAction
#[derive(Debug, Clone)]
pub enum StationActionResult {
    LockBike(Password),
    UnlockBike(u32),
    FindByPassword(Option<(u32, BikeId)>),
    DockInEmptySlot { slot: u32, password: Password },
    MarkSlotFaulty(()),
    RepairSlot(()),
}
