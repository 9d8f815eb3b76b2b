//! Custom actions for the Rental actor.

use chrono::{DateTime, Utc};

use crate::model::{Money, Rental, StationName};

#[derive(Debug, Clone)]
pub enum RentalAction {
    Close {
        end_station: StationName,
        ended_at: DateTime<Utc>,
        cost: Money,
    },
}

/// Results from RentalActions - variants match 1:1 with RentalAction
#[derive(Debug, Clone)]
pub enum RentalActionResult {
    /// The closed rental.
    Close(Rental),
}
