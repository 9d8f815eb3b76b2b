//! [`ActorEntity`] implementation for [`Station`].
//!
//! Includes the slot actions: lock, unlock, password lookup, return docking and
//! slot maintenance.

use actor_framework::ActorEntity;
use async_trait::async_trait;

use super::actions::{StationAction, StationActionResult};
use super::context::StationContext;
use super::error::StationError;
use crate::model::{Station, StationCreate, StationName, StationUpdate};

impl Station {
    fn apply(
        &mut self,
        action: StationAction,
        ctx: &StationContext,
    ) -> Result<StationActionResult, StationError> {
        match action {
            StationAction::LockBike { slot, bike } => ctx
                .with_codes(|rng| self.lock_bike_in_slot(slot, bike, rng))
                .map(StationActionResult::LockBike),
            StationAction::UnlockBike { password, bike } => self
                .unlock_bike_from_slot(password.as_str(), &bike)
                .map(StationActionResult::UnlockBike),
            StationAction::FindByPassword { password } => {
                let found = self
                    .find_bike_by_password(password.as_str())
                    .map(|(slot, bike)| (slot, bike.clone()));
                Ok(StationActionResult::FindByPassword(found))
            }
            StationAction::DockInEmptySlot { bike, retired } => ctx
                .with_codes(|rng| self.dock_in_first_empty_slot(bike, retired.as_ref(), rng))
                .map(|(slot, password)| StationActionResult::DockInEmptySlot { slot, password }),
            StationAction::MarkSlotFaulty { slot } => self
                .mark_slot_faulty(slot)
                .map(StationActionResult::MarkSlotFaulty),
            StationAction::RepairSlot { slot } => {
                self.repair_slot(slot).map(StationActionResult::RepairSlot)
            }
        }
    }
}

#[async_trait]
impl ActorEntity for Station {
    type Id = StationName;
    type Create = StationCreate;
    type Update = StationUpdate;
    type Action = StationAction;
    type ActionResult = StationActionResult;
    type Context = StationContext;
    type Error = StationError;

    fn assign_id(params: &StationCreate, _sequence: u64) -> StationName {
        params.name.clone()
    }

    fn from_create_params(name: StationName, params: StationCreate) -> Result<Self, StationError> {
        Station::new(name, params.address, params.slot_count)
    }

    fn rekey(&mut self, new_name: &StationName) -> bool {
        self.name = new_name.clone();
        true
    }

    async fn on_create(&mut self, ctx: &StationContext) -> Result<(), StationError> {
        let count = u32::try_from(self.slots().len()).unwrap_or(u32::MAX);
        if count > ctx.max_slots {
            return Err(StationError::TooManySlots {
                count,
                max: ctx.max_slots,
            });
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: StationUpdate,
        _ctx: &StationContext,
    ) -> Result<(), StationError> {
        if let Some(address) = update.address {
            self.address = address;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: StationAction,
        ctx: &StationContext,
    ) -> Result<StationActionResult, StationError> {
        self.apply(action, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BikeId, Password};

    fn central() -> Station {
        Station::new(StationName::from("Central"), "1 Main St", 2).unwrap()
    }

    #[tokio::test]
    async fn test_slot_limit_is_enforced_on_create() {
        let ctx = StationContext::seeded(4, 1);
        let mut big = Station::new(StationName::from("Big"), "", 5).unwrap();
        assert_eq!(
            big.on_create(&ctx).await,
            Err(StationError::TooManySlots { count: 5, max: 4 })
        );

        let mut ok = central();
        assert!(ok.on_create(&ctx).await.is_ok());
    }

    #[test]
    fn test_oversized_station_fails_before_allocating() {
        let params = StationCreate {
            name: StationName::from("Huge"),
            address: String::new(),
            slot_count: u32::MAX,
        };
        let result = Station::from_create_params(params.name.clone(), params);
        assert_eq!(
            result,
            Err(StationError::TooManySlots {
                count: u32::MAX,
                max: Station::MAX_SLOTS,
            })
        );
    }

    #[test]
    fn test_rekey_renames_station() {
        let mut station = central();
        assert!(station.rekey(&StationName::from("Harbour")));
        assert_eq!(station.name, StationName::from("Harbour"));
    }

    #[tokio::test]
    async fn test_lock_then_find_then_unlock() {
        let ctx = StationContext::seeded(4, 1);
        let mut station = central();

        let password = match station
            .handle_action(
                StationAction::LockBike {
                    slot: 1,
                    bike: BikeId::from("B-1"),
                },
                &ctx,
            )
            .await
            .unwrap()
        {
            StationActionResult::LockBike(password) => password,
            other => panic!("unexpected result {other:?}"),
        };

        let found = station
            .handle_action(
                StationAction::FindByPassword {
                    password: password.clone(),
                },
                &ctx,
            )
            .await
            .unwrap();
        assert!(matches!(
            found,
            StationActionResult::FindByPassword(Some((1, ref bike))) if *bike == BikeId::from("B-1")
        ));
        // Finding does not release the bike
        assert_eq!(station.slot_holding(&BikeId::from("B-1")), Some(1));

        let unlocked = station
            .handle_action(
                StationAction::UnlockBike {
                    password,
                    bike: BikeId::from("B-1"),
                },
                &ctx,
            )
            .await
            .unwrap();
        assert!(matches!(unlocked, StationActionResult::UnlockBike(1)));
    }

    #[tokio::test]
    async fn test_unlock_with_unknown_password() {
        let ctx = StationContext::seeded(4, 1);
        let mut station = central();
        let result = station
            .handle_action(
                StationAction::UnlockBike {
                    password: Password::from("0000"),
                    bike: BikeId::from("B-1"),
                },
                &ctx,
            )
            .await;
        assert!(matches!(result, Err(StationError::NoMatchingSlot)));
    }

    #[tokio::test]
    async fn test_address_update() {
        let ctx = StationContext::seeded(4, 1);
        let mut station = central();
        station
            .on_update(
                StationUpdate {
                    address: Some("2 Harbour Rd".to_string()),
                },
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(station.address, "2 Harbour Rd");
        assert_eq!(station.slots().len(), 2);
    }
}
