//! # Rental Coordinator
//!
//! Runs the rent and return use cases across the bike, station, account and rental
//! actors. No actor sees more than its own state, so the coordinator orders the steps
//! such that each contended check is a single action on a single actor:
//!
//! - **Rent**: claim the account (one rent per account at a time), flip the bike
//!   Available -> Rented (one renter per bike), then release it from its slot.
//! - **Return**: hold the cost on the account, dock the bike, then commit the bike,
//!   the rental and the account.
//! - **Dock**: claim the bike on the bike actor (one slot per bike), then lock it in.
//!
//! A step that fails after an earlier one succeeded undoes the earlier ones, so a declined
//! request leaves every actor as it found it.

pub mod contract;
pub mod error;

pub use contract::*;
pub use error::*;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

use actor_framework::ActorClient;
use mockable::Clock;
use tracing::{debug, error, info, instrument, warn};

use crate::account_actor::AccountError;
use crate::bike_actor::BikeError;
use crate::clients::{AccountClient, BikeClient, RentalClient, StationClient};
use crate::model::{
    BikeId, MemberId, Password, Rental, RentalCreate, RentalState, Station, StationName, Tariff,
};
use crate::station_actor::StationError;

impl RentError {
    fn internal(e: impl Display) -> Self {
        RentError::Internal(e.to_string())
    }
}

impl ReturnError {
    fn internal(e: impl Display) -> Self {
        ReturnError::Internal(e.to_string())
    }
}

impl DockError {
    fn internal(e: impl Display) -> Self {
        DockError::Internal(e.to_string())
    }
}

impl QueryError {
    fn internal(e: impl Display) -> Self {
        QueryError::Internal(e.to_string())
    }
}

/// Orchestrates rentals over the four resource actors.
#[derive(Clone)]
pub struct RentalCoordinator {
    bikes: BikeClient,
    stations: StationClient,
    accounts: AccountClient,
    rentals: RentalClient,
    clock: Arc<dyn Clock + Send + Sync>,
    tariff: Tariff,
}

impl RentalCoordinator {
    pub fn new(
        bikes: BikeClient,
        stations: StationClient,
        accounts: AccountClient,
        rentals: RentalClient,
        clock: Arc<dyn Clock + Send + Sync>,
        tariff: Tariff,
    ) -> Self {
        Self {
            bikes,
            stations,
            accounts,
            rentals,
            clock,
            tariff,
        }
    }

    pub fn tariff(&self) -> Tariff {
        self.tariff
    }

    /// Releases the bike behind `password` to the member and opens a rental.
    #[instrument(skip(self, request), fields(member = %request.member_id, station = %request.station))]
    pub async fn rent(&self, request: RentRequest) -> Result<RentReceipt, RentError> {
        let RentRequest {
            member_id,
            station,
            password,
        } = request;

        if self
            .accounts
            .get(member_id.clone())
            .await
            .map_err(RentError::internal)?
            .is_none()
        {
            return Err(RentError::UserNotFound(member_id));
        }
        if !self
            .stations
            .exists(station.clone())
            .await
            .map_err(RentError::internal)?
        {
            return Err(RentError::StationNotFound(station));
        }

        match self.accounts.claim_rental(member_id.clone()).await {
            Ok(()) => {}
            Err(AccountError::AlreadyRenting(_)) => return Err(RentError::AlreadyRented(member_id)),
            Err(AccountError::NotFound(_)) => return Err(RentError::UserNotFound(member_id)),
            Err(e) => return Err(RentError::internal(e)),
        }

        let result = self.rent_claimed(&member_id, &station, password).await;
        match &result {
            Ok(receipt) => {
                info!(rental_id = %receipt.rental_id, bike_id = %receipt.bike_id, "Rent completed")
            }
            Err(e) => {
                warn!(error = %e, "Rent declined");
                if let Err(release) = self.accounts.release_claim(member_id).await {
                    error!(error = %release, "Failed to release rent claim");
                }
            }
        }
        result
    }

    async fn rent_claimed(
        &self,
        member: &MemberId,
        station: &StationName,
        password: Password,
    ) -> Result<RentReceipt, RentError> {
        let (slot, bike) = self
            .stations
            .find_bike_by_password(station.clone(), password.clone())
            .await
            .map_err(RentError::internal)?
            .ok_or(RentError::InvalidPassword)?;

        match self.bikes.mark_rented(bike.clone()).await {
            Ok(()) => {}
            Err(BikeError::InvalidTransition { .. } | BikeError::NotFound(_)) => {
                return Err(RentError::BikeUnavailable(bike))
            }
            Err(e) => return Err(RentError::internal(e)),
        }

        // The slot may have changed hands since the lookup; the unlock only releases `bike`.
        if let Err(e) = self
            .stations
            .unlock_bike(station.clone(), password.clone(), bike.clone())
            .await
        {
            self.revert_bike(&bike).await;
            return Err(match e {
                StationError::NoMatchingSlot => RentError::InvalidPassword,
                StationError::UnexpectedBike { .. } => RentError::BikeUnavailable(bike),
                other => RentError::internal(other),
            });
        }
        debug!(slot, bike = %bike, "Bike released from slot");

        let start_time = self.clock.utc();
        let rental_id = self
            .rentals
            .open_rental(RentalCreate {
                bike: bike.clone(),
                member: member.clone(),
                start_station: station.clone(),
                started_at: start_time,
                unlock_password: password,
            })
            .await
            .map_err(RentError::internal)?;
        self.accounts
            .start_rental(member.clone(), rental_id)
            .await
            .map_err(RentError::internal)?;

        Ok(RentReceipt {
            rental_id,
            bike_id: bike,
            start_time,
        })
    }

    async fn revert_bike(&self, bike: &BikeId) {
        warn!(bike = %bike, "Reverting bike to Available");
        if let Err(e) = self.bikes.mark_available(bike.clone()).await {
            error!(bike = %bike, error = %e, "Failed to revert bike status");
        }
    }

    /// Docks the member's rented bike at `station`, closes the rental and charges it.
    #[instrument(skip(self, request), fields(member = %request.member_id, station = %request.station))]
    pub async fn return_bike(&self, request: ReturnRequest) -> Result<ReturnReceipt, ReturnError> {
        let ReturnRequest { member_id, station } = request;

        let account = self
            .accounts
            .get(member_id.clone())
            .await
            .map_err(ReturnError::internal)?
            .ok_or_else(|| ReturnError::UserNotFound(member_id.clone()))?;
        if !self
            .stations
            .exists(station.clone())
            .await
            .map_err(ReturnError::internal)?
        {
            return Err(ReturnError::StationNotFound(station));
        }
        let rental_id = match account.state() {
            RentalState::Active { rental } => rental,
            _ => return Err(ReturnError::NoActiveRental(member_id)),
        };
        let rental = self
            .rentals
            .get(rental_id)
            .await
            .map_err(ReturnError::internal)?
            .ok_or_else(|| ReturnError::Internal(format!("{rental_id} missing from ledger")))?;

        let now = self.clock.utc();
        let duration = rental.duration(now);
        let cost = self.tariff.cost(duration);

        let balance = match self
            .accounts
            .begin_return(member_id.clone(), rental_id, cost)
            .await
        {
            Ok(balance) => balance,
            Err(AccountError::InsufficientBalance { balance, required }) => {
                warn!(%balance, cost = %required, "Return declined");
                return Err(ReturnError::InsufficientBalance {
                    balance,
                    cost: required,
                });
            }
            Err(AccountError::NoActiveRental(_)) => return Err(ReturnError::NoActiveRental(member_id)),
            Err(e) => return Err(ReturnError::internal(e)),
        };

        let (slot_number, new_password) = match self
            .stations
            .dock_in_empty_slot(
                station.clone(),
                rental.bike.clone(),
                Some(rental.unlock_password.clone()),
            )
            .await
        {
            Ok(docked) => docked,
            Err(e) => {
                warn!(error = %e, "Docking failed, refunding hold");
                if let Err(refund) = self.accounts.abort_return(member_id.clone()).await {
                    error!(error = %refund, "Failed to refund hold");
                }
                return Err(match e {
                    StationError::NoEmptySlot => ReturnError::NoEmptySlot(station),
                    StationError::NotFound(_) => ReturnError::StationNotFound(station),
                    other => ReturnError::internal(other),
                });
            }
        };

        if let Err(e) = self.bikes.mark_available(rental.bike.clone()).await {
            self.undo_return(&member_id, &station, &rental.bike, &new_password, false)
                .await;
            return Err(ReturnError::internal(e));
        }
        if let Err(e) = self
            .rentals
            .close_rental(rental_id, station.clone(), now, cost)
            .await
        {
            self.undo_return(&member_id, &station, &rental.bike, &new_password, true)
                .await;
            return Err(ReturnError::internal(e));
        }
        // The rental is closed; only the account is left to settle.
        self.accounts
            .end_rental(member_id)
            .await
            .map_err(ReturnError::internal)?;

        let duration_minutes = Tariff::whole_minutes(duration);
        info!(%rental_id, slot_number, duration_minutes, %cost, "Return completed");
        Ok(ReturnReceipt {
            rental_id,
            bike_id: rental.bike,
            slot_number,
            new_password,
            duration_minutes,
            cost,
            balance,
        })
    }

    /// Takes the bike back out of the slot it was just docked in and refunds the hold, so
    /// the rental stays open and the member can return again.
    async fn undo_return(
        &self,
        member: &MemberId,
        station: &StationName,
        bike: &BikeId,
        password: &Password,
        bike_released: bool,
    ) {
        warn!(bike = %bike, "Return failed after docking, rolling back");
        if bike_released {
            if let Err(e) = self.bikes.mark_rented(bike.clone()).await {
                error!(bike = %bike, error = %e, "Failed to mark bike rented again");
            }
        }
        if let Err(e) = self
            .stations
            .unlock_bike(station.clone(), password.clone(), bike.clone())
            .await
        {
            error!(bike = %bike, error = %e, "Failed to take bike back out of its slot");
        }
        if let Err(e) = self.accounts.abort_return(member.clone()).await {
            error!(error = %e, "Failed to refund hold");
        }
    }

    /// Puts an Available, undocked bike into a specific slot. Returns its unlock code.
    #[instrument(skip(self))]
    pub async fn dock_bike(
        &self,
        station: StationName,
        slot: u32,
        bike: BikeId,
    ) -> Result<Password, DockError> {
        match self.bikes.dock(bike.clone()).await {
            Ok(()) => {}
            Err(BikeError::NotFound(_)) => return Err(DockError::BikeNotFound(bike)),
            Err(BikeError::Unavailable { .. }) => return Err(DockError::BikeUnavailable(bike)),
            Err(BikeError::AlreadyDocked(_)) => return Err(DockError::BikeAlreadyDocked(bike)),
            Err(e) => return Err(DockError::internal(e)),
        }

        let locked = self.stations.lock_bike(station.clone(), slot, bike.clone()).await;
        let e = match locked {
            Ok(password) => {
                info!(station = %station, slot, bike = %bike, "Bike docked");
                return Ok(password);
            }
            Err(e) => e,
        };
        warn!(bike = %bike, error = %e, "Slot lock failed, releasing dock claim");
        if let Err(undock) = self.bikes.undock(bike.clone()).await {
            error!(bike = %bike, error = %undock, "Failed to release dock claim");
        }
        Err(match e {
            StationError::NotFound(_) => DockError::StationNotFound(station),
            StationError::SlotNotFound(n) => DockError::SlotNotFound(n),
            StationError::SlotNotEmpty(n) => DockError::SlotNotEmpty(n),
            StationError::SlotFaulty(n) => DockError::SlotFaulty(n),
            StationError::BikeAlreadyDocked { .. } => DockError::BikeAlreadyDocked(bike),
            other => DockError::internal(other),
        })
    }

    async fn available_bike_ids(&self) -> Result<BTreeSet<BikeId>, QueryError> {
        let bikes = self.bikes.list().await.map_err(QueryError::internal)?;
        Ok(bikes
            .into_iter()
            .filter(|b| b.is_available())
            .map(|b| b.id)
            .collect())
    }

    async fn find_station(&self, name: StationName) -> Result<Station, QueryError> {
        self.stations
            .get(name.clone())
            .await
            .map_err(QueryError::internal)?
            .ok_or(QueryError::StationNotFound(name))
    }

    fn summarize(station: &Station, available: &BTreeSet<BikeId>) -> StationSummary {
        StationSummary {
            name: station.name.clone(),
            address: station.address.clone(),
            slot_count: station.slots().len(),
            empty_slots: station.empty_slot_count(),
            available_bikes: station
                .docked_bikes()
                .filter(|b| available.contains(*b))
                .count(),
        }
    }

    /// Docked bikes at `name` that can be rented now, in slot order.
    #[instrument(skip(self))]
    pub async fn available_bikes(&self, name: StationName) -> Result<Vec<BikeId>, QueryError> {
        let station = self.find_station(name).await?;
        let available = self.available_bike_ids().await?;
        Ok(station
            .docked_bikes()
            .filter(|b| available.contains(*b))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn station_summary(&self, name: StationName) -> Result<StationSummary, QueryError> {
        let station = self.find_station(name).await?;
        let available = self.available_bike_ids().await?;
        Ok(Self::summarize(&station, &available))
    }

    #[instrument(skip(self))]
    pub async fn station_summaries(&self) -> Result<Vec<StationSummary>, QueryError> {
        let stations = self.stations.list().await.map_err(QueryError::internal)?;
        let available = self.available_bike_ids().await?;
        Ok(stations
            .iter()
            .map(|s| Self::summarize(s, &available))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn active_rental(&self, member: MemberId) -> Result<Option<Rental>, QueryError> {
        let account = self
            .accounts
            .get(member.clone())
            .await
            .map_err(QueryError::internal)?
            .ok_or(QueryError::UserNotFound(member))?;
        match account.active_rental() {
            Some(id) => self.rentals.get(id).await.map_err(QueryError::internal),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn active_rentals(&self) -> Result<Vec<Rental>, QueryError> {
        self.rentals
            .open_rentals()
            .await
            .map_err(QueryError::internal)
    }

    /// Closed rentals of `member`, oldest first.
    #[instrument(skip(self))]
    pub async fn rental_history(&self, member: MemberId) -> Result<Vec<Rental>, QueryError> {
        let account = self
            .accounts
            .get(member.clone())
            .await
            .map_err(QueryError::internal)?
            .ok_or(QueryError::UserNotFound(member))?;

        let mut history = Vec::with_capacity(account.rental_history().len());
        for id in account.rental_history() {
            if let Some(rental) = self.rentals.get(*id).await.map_err(QueryError::internal)? {
                history.push(rental);
            }
        }
        Ok(history)
    }
}
