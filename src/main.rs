//! Demo run: two stations, two bikes, one member renting at one station and returning
//! at the other.

use actor_framework::tracing::setup_tracing;
use bike_share::coordinator::{RentRequest, ReturnRequest};
use bike_share::lifecycle::{BikeShareSettings, BikeShareSystem};
use bike_share::model::{AccountCreate, BikeId, MemberId, Money, StationCreate, StationName};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = BikeShareSettings::from_env().map_err(|e| e.to_string())?;
    info!(?settings, "Starting bike-share demo");
    let system = BikeShareSystem::new(&settings);

    let span = tracing::info_span!("setup");
    let password = async {
        for (name, address, slot_count) in [("Central", "1 Main St", 4), ("Harbour", "2 Quay Rd", 2)]
        {
            system
                .station_client
                .create_station(StationCreate {
                    name: StationName::from(name),
                    address: address.to_string(),
                    slot_count,
                })
                .await
                .map_err(|e| e.to_string())?;
        }
        for bike in ["B-1", "B-2"] {
            system
                .bike_client
                .create_bike(BikeId::from(bike))
                .await
                .map_err(|e| e.to_string())?;
        }
        let password = system
            .coordinator
            .dock_bike(StationName::from("Central"), 1, BikeId::from("B-1"))
            .await
            .map_err(|e| e.to_string())?;
        system
            .coordinator
            .dock_bike(StationName::from("Central"), 2, BikeId::from("B-2"))
            .await
            .map_err(|e| e.to_string())?;
        system
            .account_client
            .register(AccountCreate {
                member_id: MemberId::from("M-1"),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                initial_balance: Money::from_units(10),
            })
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(password)
    }
    .instrument(span)
    .await?;

    for summary in system
        .coordinator
        .station_summaries()
        .await
        .map_err(|e| e.to_string())?
    {
        info!(
            station = %summary.name,
            empty = summary.empty_slots,
            available = summary.available_bikes,
            "Station ready"
        );
    }

    let span = tracing::info_span!("rental");
    async {
        let rent = system
            .coordinator
            .rent(RentRequest {
                member_id: MemberId::from("M-1"),
                station: StationName::from("Central"),
                password,
            })
            .await;
        match rent {
            Ok(receipt) => info!(rental_id = %receipt.rental_id, bike = %receipt.bike_id, "Bike rented"),
            Err(e) => {
                error!(error = %e, "Rent failed");
                return;
            }
        }

        match system
            .coordinator
            .return_bike(ReturnRequest {
                member_id: MemberId::from("M-1"),
                station: StationName::from("Harbour"),
            })
            .await
        {
            Ok(receipt) => info!(
                slot = receipt.slot_number,
                cost = %receipt.cost,
                balance = %receipt.balance,
                "Bike returned"
            ),
            Err(e) => error!(error = %e, "Return failed"),
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Demo completed successfully");
    Ok(())
}
