//! [`ActorEntity`] implementation for [`Rental`].

use actor_framework::ActorEntity;
use async_trait::async_trait;

use super::actions::{RentalAction, RentalActionResult};
use super::error::RentalError;
use crate::model::{Rental, RentalCreate, RentalId};

#[async_trait]
impl ActorEntity for Rental {
    type Id = RentalId;
    type Create = RentalCreate;
    // Rentals change only through `Close`.
    type Update = ();
    type Action = RentalAction;
    type ActionResult = RentalActionResult;
    type Context = ();
    type Error = RentalError;

    fn assign_id(_params: &RentalCreate, sequence: u64) -> RentalId {
        RentalId(sequence)
    }

    fn from_create_params(id: RentalId, params: RentalCreate) -> Result<Self, RentalError> {
        Ok(Rental::open(id, params))
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), RentalError> {
        Err(RentalError::Immutable)
    }

    /// Open rentals are referenced by an account and a rented bike.
    async fn on_delete(&self, _ctx: &()) -> Result<(), RentalError> {
        if self.is_open() {
            return Err(RentalError::StillOpen(self.id));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: RentalAction,
        _ctx: &(),
    ) -> Result<RentalActionResult, RentalError> {
        match action {
            RentalAction::Close {
                end_station,
                ended_at,
                cost,
            } => {
                self.end_rental(end_station, ended_at, cost)?;
                Ok(RentalActionResult::Close(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BikeId, MemberId, Money, Password, StationName};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_only_closed_rentals_can_be_deleted() {
        let started_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut rental = Rental::open(
            RentalId(4),
            RentalCreate {
                bike: BikeId::from("B-1"),
                member: MemberId::from("M-1"),
                start_station: StationName::from("Central"),
                started_at,
                unlock_password: Password::from("4821"),
            },
        );
        assert_eq!(
            rental.on_delete(&()).await,
            Err(RentalError::StillOpen(RentalId(4)))
        );

        rental
            .handle_action(
                RentalAction::Close {
                    end_station: StationName::from("Harbour"),
                    ended_at: started_at,
                    cost: Money::ZERO,
                },
                &(),
            )
            .await
            .unwrap();
        assert!(rental.on_delete(&()).await.is_ok());
    }
}
