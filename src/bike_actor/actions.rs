//! Custom actions for the Bike actor.

use crate::model::BikeStatus;

#[derive(Debug, Clone)]
pub enum BikeAction {
    /// Available -> Rented.
    MarkRented,
    /// Rented -> Available. The bike is back in a slot.
    MarkAvailable,
    /// Claims the bike for a slot; fails if it is already docked or not Available.
    Dock,
    /// Releases a [`BikeAction::Dock`] claim whose slot lock did not go through.
    Undock,
    CheckStatus,
}

/// Results from BikeActions - variants match 1:1 with BikeAction
#[derive(Debug, Clone)]
pub enum BikeActionResult {
    MarkRented(()),
    MarkAvailable(()),
    Dock(()),
    Undock(()),
    CheckStatus(BikeStatus),
}
