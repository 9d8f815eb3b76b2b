//! [`ActorEntity`] implementation for [`Bike`].

use actor_framework::ActorEntity;
use async_trait::async_trait;

use super::actions::{BikeAction, BikeActionResult};
use super::error::BikeError;
use crate::model::{Bike, BikeCreate, BikeId, BikeStatus, BikeUpdate};

impl Bike {
    fn transition(&mut self, from: BikeStatus, to: BikeStatus) -> Result<(), BikeError> {
        if self.status != from {
            return Err(BikeError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    fn dock(&mut self) -> Result<(), BikeError> {
        if self.docked {
            return Err(BikeError::AlreadyDocked(self.id.clone()));
        }
        if !self.is_available() {
            return Err(BikeError::Unavailable {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.docked = true;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Bike {
    type Id = BikeId;
    type Create = BikeCreate;
    type Update = BikeUpdate;
    type Action = BikeAction;
    type ActionResult = BikeActionResult;
    type Context = ();
    type Error = BikeError;

    fn assign_id(params: &BikeCreate, _sequence: u64) -> BikeId {
        params.id.clone()
    }

    fn from_create_params(id: BikeId, _params: BikeCreate) -> Result<Self, BikeError> {
        if id.0.trim().is_empty() {
            return Err(BikeError::EmptyId);
        }
        Ok(Bike::new(id))
    }

    /// Maintenance moves: Available <-> Maintenance. Rented bikes are left to the rental flow.
    async fn on_update(&mut self, update: BikeUpdate, _ctx: &()) -> Result<(), BikeError> {
        match (self.status, update.status) {
            (_, None) => Ok(()),
            (from, Some(to)) if from == to => Ok(()),
            (BikeStatus::Available, Some(BikeStatus::Maintenance)) => {
                self.transition(BikeStatus::Available, BikeStatus::Maintenance)
            }
            (BikeStatus::Maintenance, Some(BikeStatus::Available)) => {
                self.transition(BikeStatus::Maintenance, BikeStatus::Available)
            }
            (from, Some(to)) => Err(BikeError::InvalidTransition {
                id: self.id.clone(),
                from,
                to,
            }),
        }
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), BikeError> {
        if self.docked || self.status == BikeStatus::Rented {
            return Err(BikeError::InUse(self.id.clone()));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BikeAction,
        _ctx: &(),
    ) -> Result<BikeActionResult, BikeError> {
        match action {
            BikeAction::MarkRented => {
                self.transition(BikeStatus::Available, BikeStatus::Rented)?;
                self.docked = false;
                Ok(BikeActionResult::MarkRented(()))
            }
            BikeAction::MarkAvailable => {
                self.transition(BikeStatus::Rented, BikeStatus::Available)?;
                self.docked = true;
                Ok(BikeActionResult::MarkAvailable(()))
            }
            BikeAction::Dock => self.dock().map(BikeActionResult::Dock),
            BikeAction::Undock => {
                self.docked = false;
                Ok(BikeActionResult::Undock(()))
            }
            BikeAction::CheckStatus => Ok(BikeActionResult::CheckStatus(self.status)),
        }
    }
}
