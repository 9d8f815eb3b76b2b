//! # Station Client
//!
//! Provides a high‑level API for interacting with the `Station` actor.
use crate::model::{BikeId, Password, Station, StationCreate, StationName, StationUpdate};
use crate::station_actor::{StationAction, StationActionResult, StationError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Station actor.
#[derive(Clone)]
pub struct StationClient {
    inner: ResourceClient<Station>,
}

impl StationClient {
    pub fn new(inner: ResourceClient<Station>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Station> for StationClient {
    type Error = StationError;

    fn inner(&self) -> &ResourceClient<Station> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<StationError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(name)) => StationError::NotFound(name),
            Err(FrameworkError::AlreadyExists(name)) => StationError::DuplicateName(name),
            Err(other) => StationError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl StationClient {
    #[instrument(skip(self))]
    pub async fn create_station(&self, params: StationCreate) -> Result<StationName, StationError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_station(
        &self,
        name: StationName,
        update: StationUpdate,
    ) -> Result<Station, StationError> {
        debug!("Sending request");
        self.inner.update(name, update).await.map_err(Self::map_error)
    }

    /// Renames a station. Names stay unique: a taken name fails with
    /// [`StationError::DuplicateName`].
    #[instrument(skip(self))]
    pub async fn rename_station(
        &self,
        name: StationName,
        new_name: StationName,
    ) -> Result<StationName, StationError> {
        if new_name.0.trim().is_empty() {
            return Err(StationError::EmptyName);
        }
        debug!("Sending request");
        self.inner
            .rekey(name, new_name.clone())
            .await
            .map_err(Self::map_error)?;
        Ok(new_name)
    }

    async fn act(
        &self,
        name: StationName,
        action: StationAction,
    ) -> Result<StationActionResult, StationError> {
        self.inner
            .perform_action(name, action)
            .await
            .map_err(Self::map_error)
    }

    /// Docks `bike` in slot `slot` and returns its unlock code.
    #[instrument(skip(self))]
    pub async fn lock_bike(
        &self,
        name: StationName,
        slot: u32,
        bike: BikeId,
    ) -> Result<Password, StationError> {
        debug!("Locking bike in slot");
        match self.act(name, StationAction::LockBike { slot, bike }).await? {
            StationActionResult::LockBike(password) => Ok(password),
            other => Err(unexpected(other)),
        }
    }

    /// Releases `bike` from the slot behind `password` and returns the slot number. Fails
    /// with [`StationError::UnexpectedBike`], leaving the slot locked, if that slot holds
    /// a different bike.
    #[instrument(skip(self, password))]
    pub async fn unlock_bike(
        &self,
        name: StationName,
        password: Password,
        bike: BikeId,
    ) -> Result<u32, StationError> {
        debug!("Unlocking bike");
        match self
            .act(name, StationAction::UnlockBike { password, bike })
            .await?
        {
            StationActionResult::UnlockBike(slot) => Ok(slot),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, password))]
    pub async fn find_bike_by_password(
        &self,
        name: StationName,
        password: Password,
    ) -> Result<Option<(u32, BikeId)>, StationError> {
        match self
            .act(name, StationAction::FindByPassword { password })
            .await?
        {
            StationActionResult::FindByPassword(found) => Ok(found),
            other => Err(unexpected(other)),
        }
    }

    /// Docks `bike` in the first empty slot. Returns the slot number and the new code,
    /// which is never `retired`.
    #[instrument(skip(self))]
    pub async fn dock_in_empty_slot(
        &self,
        name: StationName,
        bike: BikeId,
        retired: Option<Password>,
    ) -> Result<(u32, Password), StationError> {
        debug!("Docking in first empty slot");
        match self
            .act(name, StationAction::DockInEmptySlot { bike, retired })
            .await?
        {
            StationActionResult::DockInEmptySlot { slot, password } => Ok((slot, password)),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn mark_slot_faulty(&self, name: StationName, slot: u32) -> Result<(), StationError> {
        match self.act(name, StationAction::MarkSlotFaulty { slot }).await? {
            StationActionResult::MarkSlotFaulty(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn repair_slot(&self, name: StationName, slot: u32) -> Result<(), StationError> {
        match self.act(name, StationAction::RepairSlot { slot }).await? {
            StationActionResult::RepairSlot(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: StationActionResult) -> StationError {
    StationError::ActorCommunicationError(format!("unexpected response: {result:?}"))
}
