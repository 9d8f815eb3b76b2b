//! # Bike Client
//!
//! Provides a high‑level API for interacting with the `Bike` actor.
use crate::bike_actor::{BikeAction, BikeActionResult, BikeError};
use crate::model::{Bike, BikeCreate, BikeId, BikeStatus, BikeUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Bike actor.
#[derive(Clone)]
pub struct BikeClient {
    inner: ResourceClient<Bike>,
}

impl BikeClient {
    pub fn new(inner: ResourceClient<Bike>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Bike> for BikeClient {
    type Error = BikeError;

    fn inner(&self) -> &ResourceClient<Bike> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<BikeError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => BikeError::NotFound(id),
            Err(FrameworkError::AlreadyExists(id)) => BikeError::AlreadyExists(id),
            Err(other) => BikeError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl BikeClient {
    #[instrument(skip(self))]
    pub async fn create_bike(&self, id: BikeId) -> Result<BikeId, BikeError> {
        debug!("Sending request");
        self.inner
            .create(BikeCreate { id })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_bike(&self, id: BikeId, update: BikeUpdate) -> Result<Bike, BikeError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn act(&self, id: BikeId, action: BikeAction) -> Result<BikeActionResult, BikeError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Available -> Rented; fails for any other status.
    #[instrument(skip(self))]
    pub async fn mark_rented(&self, id: BikeId) -> Result<(), BikeError> {
        debug!("Marking bike rented");
        match self.act(id, BikeAction::MarkRented).await? {
            BikeActionResult::MarkRented(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Rented -> Available; fails for any other status.
    #[instrument(skip(self))]
    pub async fn mark_available(&self, id: BikeId) -> Result<(), BikeError> {
        debug!("Marking bike available");
        match self.act(id, BikeAction::MarkAvailable).await? {
            BikeActionResult::MarkAvailable(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Claims the bike for a slot. Only one claim holds until [`BikeClient::undock`] or a
    /// rental releases it.
    #[instrument(skip(self))]
    pub async fn dock(&self, id: BikeId) -> Result<(), BikeError> {
        debug!("Claiming bike for a slot");
        match self.act(id, BikeAction::Dock).await? {
            BikeActionResult::Dock(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn undock(&self, id: BikeId) -> Result<(), BikeError> {
        match self.act(id, BikeAction::Undock).await? {
            BikeActionResult::Undock(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn status(&self, id: BikeId) -> Result<BikeStatus, BikeError> {
        match self.act(id, BikeAction::CheckStatus).await? {
            BikeActionResult::CheckStatus(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: BikeActionResult) -> BikeError {
    BikeError::ActorCommunicationError(format!("unexpected response: {result:?}"))
}
