use std::sync::{Arc, Mutex};

use actor_framework::ActorClient;
use bike_share::account_actor::AccountError;
use bike_share::bike_actor::BikeError;
use bike_share::coordinator::{DockError, RentError, RentRequest, ReturnError, ReturnRequest};
use bike_share::lifecycle::{BikeShareSettings, BikeShareSystem};
use bike_share::model::{
    AccountCreate, BikeId, BikeStatus, MemberId, Money, Password, RentalState, Station,
    StationCreate, StationName,
};
use bike_share::rental_actor::RentalError;
use bike_share::station_actor::StationError;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock the tests move forward by hand.
struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    fn advance(&self, minutes: i64) {
        let mut now = self.0.lock().expect("clock mutex");
        *now += TimeDelta::minutes(minutes);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

struct Fixture {
    system: BikeShareSystem,
    clock: Arc<MutableClock>,
}

fn central() -> StationName {
    StationName::from("Central")
}

fn harbour() -> StationName {
    StationName::from("Harbour")
}

/// Central (4 slots) and Harbour (2 slots), bikes B-1..B-4 registered but undocked.
async fn fixture() -> Fixture {
    let clock = Arc::new(MutableClock(Mutex::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    )));
    let mut settings = BikeShareSettings::builtin();
    settings.password_seed = Some(7);
    let system = BikeShareSystem::with_clock(&settings, clock.clone());

    for (name, slot_count) in [(central(), 4), (harbour(), 2)] {
        system
            .station_client
            .create_station(StationCreate {
                name,
                address: "Somewhere 1".to_string(),
                slot_count,
            })
            .await
            .expect("Failed to create station");
    }
    for bike in ["B-1", "B-2", "B-3", "B-4"] {
        system
            .bike_client
            .create_bike(BikeId::from(bike))
            .await
            .expect("Failed to create bike");
    }

    Fixture { system, clock }
}

async fn register(system: &BikeShareSystem, member: &str, balance: Money) -> MemberId {
    system
        .account_client
        .register(AccountCreate {
            member_id: MemberId::from(member),
            name: member.to_string(),
            email: format!("{member}@example.com"),
            initial_balance: balance,
        })
        .await
        .expect("Failed to register member")
}

async fn dock(system: &BikeShareSystem, station: StationName, slot: u32, bike: &str) -> Password {
    system
        .coordinator
        .dock_bike(station, slot, BikeId::from(bike))
        .await
        .expect("Failed to dock bike")
}

fn rent_request(member: &MemberId, station: StationName, password: &Password) -> RentRequest {
    RentRequest {
        member_id: member.clone(),
        station,
        password: password.clone(),
    }
}

fn return_request(member: &MemberId, station: StationName) -> ReturnRequest {
    ReturnRequest {
        member_id: member.clone(),
        station,
    }
}

#[tokio::test]
async fn test_rent_and_return_at_another_station() {
    let Fixture { system, clock } = fixture().await;
    let member = register(&system, "alice", Money::from_units(10)).await;
    let password = dock(&system, central(), 1, "B-1").await;

    let rented = system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
    assert_eq!(rented.bike_id, BikeId::from("B-1"));
    assert_eq!(
        system.bike_client.status(BikeId::from("B-1")).await.unwrap(),
        BikeStatus::Rented
    );

    clock.advance(45);
    let returned = system
        .coordinator
        .return_bike(return_request(&member, harbour()))
        .await
        .expect("Return failed");

    assert_eq!(returned.rental_id, rented.rental_id);
    assert_eq!(returned.slot_number, 1);
    assert_eq!(returned.duration_minutes, 45);
    assert_eq!(returned.cost, Money::from_cents(225));
    assert_eq!(returned.cost.to_string(), "2.25");
    assert_eq!(returned.balance, Money::from_cents(775));
    assert_ne!(returned.new_password, password);

    // The bike is back in service under its new code
    assert_eq!(
        system.bike_client.status(BikeId::from("B-1")).await.unwrap(),
        BikeStatus::Available
    );
    let harbour_station = system.station_client.get(harbour()).await.unwrap().unwrap();
    assert_eq!(
        harbour_station.slot(1).and_then(|s| s.password()),
        Some(&returned.new_password)
    );
    let central_station = system.station_client.get(central()).await.unwrap().unwrap();
    assert!(central_station.slot(1).unwrap().is_empty());

    // The old code no longer opens anything at Central
    let again = system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await;
    assert_eq!(again, Err(RentError::InvalidPassword));

    let history = system.coordinator.rental_history(member.clone()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].end_station, Some(harbour()));
    assert_eq!(history[0].cost, Some(Money::from_cents(225)));
    assert!(system.coordinator.active_rental(member).await.unwrap().is_none());

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_rides_within_free_minutes_cost_nothing() {
    let Fixture { system, clock } = fixture().await;
    let member = register(&system, "bob", Money::ZERO).await;
    let password = dock(&system, central(), 2, "B-2").await;

    system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
    clock.advance(29);
    let returned = system
        .coordinator
        .return_bike(return_request(&member, central()))
        .await
        .expect("Return failed");

    assert_eq!(returned.cost, Money::ZERO);
    assert_eq!(returned.balance, Money::ZERO);
    assert_eq!(returned.slot_number, 1);
}

#[tokio::test]
async fn test_return_to_full_station_changes_nothing() {
    let Fixture { system, clock } = fixture().await;
    let member = register(&system, "carol", Money::from_units(10)).await;
    let password = dock(&system, central(), 1, "B-1").await;
    dock(&system, harbour(), 1, "B-2").await;
    dock(&system, harbour(), 2, "B-3").await;

    let rented = system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
    clock.advance(60);

    let result = system
        .coordinator
        .return_bike(return_request(&member, harbour()))
        .await;
    assert_eq!(result, Err(ReturnError::NoEmptySlot(harbour())));

    let account = system.account_client.get(member.clone()).await.unwrap().unwrap();
    assert_eq!(
        account.state(),
        RentalState::Active {
            rental: rented.rental_id
        }
    );
    assert_eq!(account.balance(), Money::from_units(10));
    assert_eq!(
        system.bike_client.status(BikeId::from("B-1")).await.unwrap(),
        BikeStatus::Rented
    );
    let open = system.coordinator.active_rentals().await.unwrap();
    assert_eq!(open.len(), 1);

    // Central still has room
    let returned = system
        .coordinator
        .return_bike(return_request(&member, central()))
        .await
        .expect("Return failed");
    assert_eq!(returned.cost, Money::from_cents(450));
}

#[tokio::test]
async fn test_insufficient_balance_keeps_rental_open() {
    let Fixture { system, clock } = fixture().await;
    let member = register(&system, "dave", Money::from_units(1)).await;
    let password = dock(&system, central(), 1, "B-1").await;

    system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
    clock.advance(45);

    let result = system
        .coordinator
        .return_bike(return_request(&member, harbour()))
        .await;
    assert_eq!(
        result,
        Err(ReturnError::InsufficientBalance {
            balance: Money::from_units(1),
            cost: Money::from_cents(225),
        })
    );
    let harbour_station = system.station_client.get(harbour()).await.unwrap().unwrap();
    assert_eq!(harbour_station.empty_slot_count(), 2);

    system
        .account_client
        .add_funds(member.clone(), Money::from_units(5))
        .await
        .unwrap();
    let returned = system
        .coordinator
        .return_bike(return_request(&member, harbour()))
        .await
        .expect("Return failed");
    assert_eq!(returned.balance, Money::from_cents(375));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_parties() {
    let Fixture { system, .. } = fixture().await;
    let member = register(&system, "erin", Money::from_units(10)).await;
    let password = dock(&system, central(), 1, "B-1").await;
    let wrong = Password::from(if password.as_str() == "1000" { "1001" } else { "1000" });

    let result = system
        .coordinator
        .rent(rent_request(&member, central(), &wrong))
        .await;
    assert_eq!(result, Err(RentError::InvalidPassword));

    let result = system
        .coordinator
        .rent(rent_request(&MemberId::from("nobody"), central(), &password))
        .await;
    assert_eq!(result, Err(RentError::UserNotFound(MemberId::from("nobody"))));

    let result = system
        .coordinator
        .rent(rent_request(&member, StationName::from("Nowhere"), &password))
        .await;
    assert_eq!(result, Err(RentError::StationNotFound(StationName::from("Nowhere"))));

    let result = system
        .coordinator
        .return_bike(return_request(&member, central()))
        .await;
    assert_eq!(result, Err(ReturnError::NoActiveRental(member.clone())));

    // None of the failures left the account claimed
    system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
}

#[tokio::test]
async fn test_concurrent_rents_of_one_bike_have_one_winner() {
    let Fixture { system, .. } = fixture().await;
    let first = register(&system, "fay", Money::from_units(10)).await;
    let second = register(&system, "gus", Money::from_units(10)).await;
    let password = dock(&system, central(), 3, "B-3").await;

    let (a, b) = tokio::join!(
        system
            .coordinator
            .rent(rent_request(&first, central(), &password)),
        system
            .coordinator
            .rent(rent_request(&second, central(), &password)),
    );

    let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "results: {a:?}, {b:?}");
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(
        loser,
        Err(RentError::BikeUnavailable(_) | RentError::InvalidPassword)
    ));

    let open = system.coordinator.active_rentals().await.unwrap();
    assert_eq!(open.len(), 1);
    for member in [first, second] {
        let account = system.account_client.get(member).await.unwrap().unwrap();
        assert!(matches!(
            account.state(),
            RentalState::Idle | RentalState::Active { .. }
        ));
    }
}

#[tokio::test]
async fn test_concurrent_rents_by_one_member_have_one_winner() {
    let Fixture { system, .. } = fixture().await;
    let member = register(&system, "hal", Money::from_units(10)).await;
    let p1 = dock(&system, central(), 1, "B-1").await;
    let p2 = dock(&system, central(), 2, "B-2").await;

    let (a, b) = tokio::join!(
        system.coordinator.rent(rent_request(&member, central(), &p1)),
        system.coordinator.rent(rent_request(&member, central(), &p2)),
    );

    let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "results: {a:?}, {b:?}");
    let loser = if a.is_ok() { b } else { a };
    assert_eq!(loser, Err(RentError::AlreadyRented(member)));

    let summary = system.coordinator.station_summary(central()).await.unwrap();
    assert_eq!(summary.available_bikes, 1);
    assert_eq!(summary.empty_slots, 3);
}

#[tokio::test]
async fn test_registration_uniqueness() {
    let Fixture { system, .. } = fixture().await;
    register(&system, "ivy", Money::ZERO).await;

    let duplicate_station = system
        .station_client
        .create_station(StationCreate {
            name: central(),
            address: "Elsewhere 2".to_string(),
            slot_count: 1,
        })
        .await;
    assert_eq!(
        duplicate_station,
        Err(StationError::DuplicateName("Central".to_string()))
    );

    let duplicate_member = system
        .account_client
        .register(AccountCreate {
            member_id: MemberId::from("ivy"),
            name: "Ivy Two".to_string(),
            email: "other@example.com".to_string(),
            initial_balance: Money::ZERO,
        })
        .await;
    assert_eq!(
        duplicate_member,
        Err(AccountError::DuplicateMember("ivy".to_string()))
    );

    let duplicate_email = system
        .account_client
        .register(AccountCreate {
            member_id: MemberId::from("ivy-2"),
            name: "Ivy Two".to_string(),
            email: "IVY@example.com".to_string(),
            initial_balance: Money::ZERO,
        })
        .await;
    assert!(matches!(duplicate_email, Err(AccountError::DuplicateEmail(_))));
    assert!(!system
        .account_client
        .exists(MemberId::from("ivy-2"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_bike_cannot_be_docked_twice() {
    let Fixture { system, .. } = fixture().await;
    dock(&system, central(), 1, "B-1").await;

    let result = system
        .coordinator
        .dock_bike(harbour(), 1, BikeId::from("B-1"))
        .await;
    assert_eq!(result, Err(DockError::BikeAlreadyDocked(BikeId::from("B-1"))));

    let summaries = system.coordinator.station_summaries().await.unwrap();
    let docked: usize = summaries.iter().map(|s| s.available_bikes).sum();
    assert_eq!(docked, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_docks_of_one_bike_have_one_winner() {
    for _ in 0..20 {
        let Fixture { system, .. } = fixture().await;

        let (a, b) = tokio::join!(
            system
                .coordinator
                .dock_bike(central(), 1, BikeId::from("B-1")),
            system
                .coordinator
                .dock_bike(harbour(), 1, BikeId::from("B-1")),
        );

        let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "results: {a:?}, {b:?}");
        let loser = if a.is_ok() { b } else { a };
        assert_eq!(loser, Err(DockError::BikeAlreadyDocked(BikeId::from("B-1"))));

        let stations = system.station_client.list().await.unwrap();
        let holders = stations
            .iter()
            .filter(|s| s.slot_holding(&BikeId::from("B-1")).is_some())
            .count();
        assert_eq!(holders, 1);
        system.shutdown().await.expect("Shutdown failed");
    }
}

#[tokio::test]
async fn test_failed_slot_lock_releases_the_bike() {
    let Fixture { system, .. } = fixture().await;
    dock(&system, central(), 1, "B-1").await;

    let taken = system
        .coordinator
        .dock_bike(central(), 1, BikeId::from("B-2"))
        .await;
    assert_eq!(taken, Err(DockError::SlotNotEmpty(1)));

    // B-2 was not left claimed by the failed attempt
    dock(&system, central(), 2, "B-2").await;
}

#[tokio::test]
async fn test_oversized_station_is_rejected() {
    let Fixture { system, .. } = fixture().await;

    let result = system
        .station_client
        .create_station(StationCreate {
            name: StationName::from("Stadium"),
            address: "Ring Rd".to_string(),
            slot_count: u32::MAX,
        })
        .await;
    assert_eq!(
        result,
        Err(StationError::TooManySlots {
            count: u32::MAX,
            max: Station::MAX_SLOTS,
        })
    );
    assert!(!system
        .station_client
        .exists(StationName::from("Stadium"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_bikes_and_rentals_in_use_cannot_be_deleted() {
    let Fixture { system, clock } = fixture().await;
    let member = register(&system, "kim", Money::from_units(10)).await;
    let password = dock(&system, central(), 1, "B-1").await;

    let docked = system.bike_client.delete(BikeId::from("B-1")).await;
    assert_eq!(docked, Err(BikeError::InUse(BikeId::from("B-1"))));

    let rented = system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
    let bike = system.bike_client.delete(BikeId::from("B-1")).await;
    assert_eq!(bike, Err(BikeError::InUse(BikeId::from("B-1"))));
    let rental = system.rental_client.delete(rented.rental_id).await;
    assert_eq!(rental, Err(RentalError::StillOpen(rented.rental_id)));

    clock.advance(10);
    system
        .coordinator
        .return_bike(return_request(&member, harbour()))
        .await
        .expect("Return failed");

    // Closed rentals and idle, undocked bikes can go
    system.rental_client.delete(rented.rental_id).await.unwrap();
    system.bike_client.delete(BikeId::from("B-4")).await.unwrap();
}

#[tokio::test]
async fn test_station_rename_keeps_names_unique() {
    let Fixture { system, .. } = fixture().await;
    let member = register(&system, "lou", Money::from_units(10)).await;
    let password = dock(&system, central(), 1, "B-1").await;

    let taken = system
        .station_client
        .rename_station(central(), harbour())
        .await;
    assert_eq!(taken, Err(StationError::DuplicateName("Harbour".to_string())));

    let uptown = system
        .station_client
        .rename_station(central(), StationName::from("Uptown"))
        .await
        .expect("Rename failed");
    assert!(!system.station_client.exists(central()).await.unwrap());
    let station = system.station_client.get(uptown.clone()).await.unwrap().unwrap();
    assert_eq!(station.name, uptown);
    assert_eq!(station.slot_holding(&BikeId::from("B-1")), Some(1));

    let missing = system
        .station_client
        .rename_station(central(), StationName::from("Old Town"))
        .await;
    assert_eq!(missing, Err(StationError::NotFound("Central".to_string())));

    // Docked bikes move with the station
    system
        .coordinator
        .rent(rent_request(&member, uptown, &password))
        .await
        .expect("Rent failed");
}

#[tokio::test]
async fn test_receipts_use_camel_case_json() {
    let Fixture { system, clock } = fixture().await;
    let member = register(&system, "jo", Money::from_units(10)).await;
    let password = dock(&system, central(), 1, "B-1").await;

    system
        .coordinator
        .rent(rent_request(&member, central(), &password))
        .await
        .expect("Rent failed");
    clock.advance(45);
    let returned = system
        .coordinator
        .return_bike(return_request(&member, harbour()))
        .await
        .expect("Return failed");

    let json = serde_json::to_value(&returned).unwrap();
    assert_eq!(json["bikeId"], "B-1");
    assert_eq!(json["slotNumber"], 1);
    assert_eq!(json["durationMinutes"], 45);
    assert_eq!(json["cost"], 225);
    assert_eq!(json["balance"], 775);
    assert_eq!(json["newPassword"], returned.new_password.as_str());

    let request: RentRequest = serde_json::from_value(serde_json::json!({
        "memberId": "jo",
        "station": "Central",
        "password": "1234",
    }))
    .unwrap();
    assert_eq!(request.member_id, MemberId::from("jo"));
}
