//! Request and receipt types of the rent/return use cases.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{BikeId, MemberId, Money, Password, RentalId, StationName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRequest {
    pub member_id: MemberId,
    pub station: StationName,
    pub password: Password,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentReceipt {
    pub rental_id: RentalId,
    pub bike_id: BikeId,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub member_id: MemberId,
    pub station: StationName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceipt {
    pub rental_id: RentalId,
    pub bike_id: BikeId,
    pub slot_number: u32,
    /// Code that unlocks the bike from its new slot.
    pub new_password: Password,
    pub duration_minutes: u64,
    pub cost: Money,
    /// Balance after the cost was charged.
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSummary {
    pub name: StationName,
    pub address: String,
    pub slot_count: usize,
    pub empty_slots: usize,
    /// Docked bikes that can be rented right now.
    pub available_bikes: usize,
}
