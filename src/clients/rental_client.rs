//! # Rental Client
//!
//! Provides a high‑level API for interacting with the rental ledger.
use crate::model::{Money, Rental, RentalCreate, RentalId, StationName};
use crate::rental_actor::{RentalAction, RentalActionResult, RentalError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Rental actor.
#[derive(Clone)]
pub struct RentalClient {
    inner: ResourceClient<Rental>,
}

impl RentalClient {
    pub fn new(inner: ResourceClient<Rental>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Rental> for RentalClient {
    type Error = RentalError;

    fn inner(&self) -> &ResourceClient<Rental> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<RentalError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => RentalError::NotFound(id),
            Err(other) => RentalError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl RentalClient {
    #[instrument(skip(self))]
    pub async fn open_rental(&self, params: RentalCreate) -> Result<RentalId, RentalError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Closes an open rental and returns it.
    #[instrument(skip(self))]
    pub async fn close_rental(
        &self,
        id: RentalId,
        end_station: StationName,
        ended_at: DateTime<Utc>,
        cost: Money,
    ) -> Result<Rental, RentalError> {
        debug!("Closing rental");
        let action = RentalAction::Close {
            end_station,
            ended_at,
            cost,
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            RentalActionResult::Close(rental) => Ok(rental),
        }
    }

    /// Rentals that have not been closed yet.
    #[instrument(skip(self))]
    pub async fn open_rentals(&self) -> Result<Vec<Rental>, RentalError> {
        let rentals = self.list().await?;
        Ok(rentals.into_iter().filter(Rental::is_open).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BikeId, MemberId, Password};
    use actor_framework::mock::MockClient;
    use chrono::TimeZone;

    fn rental(id: u64, closed: bool) -> Rental {
        let started_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut rental = Rental::open(
            RentalId(id),
            RentalCreate {
                bike: BikeId(format!("B-{id}")),
                member: MemberId(format!("M-{id}")),
                start_station: StationName::from("Central"),
                started_at,
                unlock_password: Password::from("1234"),
            },
        );
        if closed {
            rental
                .end_rental(StationName::from("Harbour"), started_at, Money::ZERO)
                .unwrap();
        }
        rental
    }

    #[tokio::test]
    async fn test_open_rentals_filters_closed() {
        let mut mock = MockClient::<Rental>::new();
        mock.expect_list()
            .return_ok(vec![rental(1, true), rental(2, false), rental(3, true)]);

        let client = RentalClient::new(mock.client());
        let open: Vec<RentalId> = client
            .open_rentals()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(open, vec![RentalId(2)]);
    }

    #[tokio::test]
    async fn test_second_close_keeps_its_type() {
        let mut mock = MockClient::<Rental>::new();
        mock.expect_action(RentalId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                RentalError::AlreadyClosed(RentalId(1)),
            )));

        let client = RentalClient::new(mock.client());
        let result = client
            .close_rental(RentalId(1), StationName::from("Central"), Utc::now(), Money::ZERO)
            .await;
        assert_eq!(result, Err(RentalError::AlreadyClosed(RentalId(1))));
    }
}
