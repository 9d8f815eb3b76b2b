/// A bicycle in the fleet.
///
/// # Actor Framework
/// Managed by the bike actor ([`crate::bike_actor`]), keyed by its [`BikeId`]. The status only
/// changes through the rental flow (`MarkRented`/`MarkAvailable`) or an administrative
/// update between Available and Maintenance. `docked` records whether some station slot
/// holds the bike, so at most one station can claim it.
use serde::{Deserialize, Serialize};

use super::BikeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BikeStatus {
    Available,
    Rented,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    pub id: BikeId,
    pub status: BikeStatus,
    #[serde(default)]
    pub docked: bool,
}

impl Bike {
    /// New bikes join the fleet Available.
    pub fn new(id: BikeId) -> Self {
        Self {
            id,
            status: BikeStatus::Available,
            docked: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BikeStatus::Available
    }
}

#[derive(Debug, Clone)]
pub struct BikeCreate {
    pub id: BikeId,
}

// Administrative status change; only Available <-> Maintenance is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BikeUpdate {
    pub status: Option<BikeStatus>,
}
