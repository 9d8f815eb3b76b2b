/// A rental session, from undocking to redocking.
///
/// # Actor Framework
/// Managed by the rental ledger actor ([`crate::rental_actor`]); ids come from the ledger's
/// own sequence. A rental is written once when it opens and once when it closes.
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{BikeId, MemberId, Money, Password, RentalId, StationName};
use crate::rental_actor::RentalError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: RentalId,
    pub bike: BikeId,
    pub member: MemberId,
    pub start_station: StationName,
    pub end_station: Option<StationName>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub unlock_password: Password,
    pub cost: Option<Money>,
}

impl Rental {
    pub fn open(id: RentalId, params: RentalCreate) -> Self {
        Self {
            id,
            bike: params.bike,
            member: params.member,
            start_station: params.start_station,
            end_station: None,
            started_at: params.started_at,
            ended_at: None,
            unlock_password: params.unlock_password,
            cost: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Closes the rental. A closed rental never changes again.
    pub fn end_rental(
        &mut self,
        end_station: StationName,
        at: DateTime<Utc>,
        cost: Money,
    ) -> Result<(), RentalError> {
        if !self.is_open() {
            return Err(RentalError::AlreadyClosed(self.id));
        }
        self.end_station = Some(end_station);
        self.ended_at = Some(at);
        self.cost = Some(cost);
        Ok(())
    }

    /// Elapsed time: up to `now` while open, fixed once closed.
    pub fn duration(&self, now: DateTime<Utc>) -> TimeDelta {
        self.ended_at.unwrap_or(now) - self.started_at
    }
}

#[derive(Debug, Clone)]
pub struct RentalCreate {
    pub bike: BikeId,
    pub member: MemberId,
    pub start_station: StationName,
    pub started_at: DateTime<Utc>,
    pub unlock_password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rental() -> Rental {
        Rental::open(
            RentalId(1),
            RentalCreate {
                bike: BikeId::from("B-1"),
                member: MemberId::from("M-1"),
                start_station: StationName::from("Central"),
                started_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
                unlock_password: Password::from("1234"),
            },
        )
    }

    #[test]
    fn test_open_duration_tracks_now() {
        let rental = rental();
        let later = rental.started_at + TimeDelta::minutes(12);
        assert_eq!(rental.duration(later), TimeDelta::minutes(12));
        assert_eq!(
            rental.duration(later + TimeDelta::minutes(1)),
            TimeDelta::minutes(13)
        );
    }

    #[test]
    fn test_closed_duration_is_fixed() {
        let mut rental = rental();
        let end = rental.started_at + TimeDelta::minutes(45);
        rental
            .end_rental(StationName::from("Harbour"), end, Money::from_cents(225))
            .unwrap();

        assert!(!rental.is_open());
        assert_eq!(
            rental.duration(end + TimeDelta::hours(3)),
            TimeDelta::minutes(45)
        );
    }

    #[test]
    fn test_second_close_is_rejected() {
        let mut rental = rental();
        let end = rental.started_at + TimeDelta::minutes(5);
        rental
            .end_rental(StationName::from("Harbour"), end, Money::ZERO)
            .unwrap();

        let again = rental.end_rental(StationName::from("Central"), end, Money::ZERO);
        assert!(matches!(again, Err(RentalError::AlreadyClosed(RentalId(1)))));
        assert_eq!(rental.end_station, Some(StationName::from("Harbour")));
    }
}
