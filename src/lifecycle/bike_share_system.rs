use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::{error, info};

use super::BikeShareSettings;
use crate::account_actor::EmailRegistry;
use crate::clients::{AccountClient, BikeClient, RentalClient, StationClient};
use crate::coordinator::RentalCoordinator;
use crate::station_actor::StationContext;

#[derive(Debug, Error)]
#[error("Actor task failed: {0}")]
pub struct ShutdownError(String);

/// The running bike-share system.
///
/// `BikeShareSystem` is responsible for:
/// - **Lifecycle Management**: starting the four resource actors and stopping them again
/// - **Dependency Wiring**: building each actor's context from [`BikeShareSettings`] and
///   handing the clients to the [`RentalCoordinator`]
///
/// # Example
///
/// ```rust
/// use bike_share::lifecycle::{BikeShareSettings, BikeShareSystem};
/// use bike_share::model::{StationCreate, StationName};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = BikeShareSystem::new(&BikeShareSettings::builtin());
///
///     system
///         .station_client
///         .create_station(StationCreate {
///             name: StationName::from("Central"),
///             address: "1 Main St".to_string(),
///             slot_count: 4,
///         })
///         .await?;
///     let summary = system
///         .coordinator
///         .station_summary(StationName::from("Central"))
///         .await?;
///     assert_eq!(summary.empty_slots, 4);
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct BikeShareSystem {
    pub bike_client: BikeClient,
    pub station_client: StationClient,
    pub account_client: AccountClient,
    pub rental_client: RentalClient,
    /// Rent/return use cases over the clients above.
    pub coordinator: RentalCoordinator,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BikeShareSystem {
    /// Starts every actor on the current Tokio runtime, timestamping with the system clock.
    pub fn new(settings: &BikeShareSettings) -> Self {
        Self::with_clock(settings, Arc::new(DefaultClock))
    }

    pub fn with_clock(settings: &BikeShareSettings, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let capacity = settings.mailbox_capacity();

        // 1. Create actors
        let (bike_actor, bike_client) = crate::bike_actor::new(capacity);
        let (station_actor, station_client) = crate::station_actor::new(capacity);
        let (account_actor, account_client) = crate::account_actor::new(capacity);
        let (rental_actor, rental_client) = crate::rental_actor::new(capacity);

        // 2. Start actors with injected context
        let station_context = match settings.password_seed {
            Some(seed) => StationContext::seeded(settings.max_slots_per_station(), seed),
            None => StationContext::new(settings.max_slots_per_station()),
        };
        let handles = vec![
            tokio::spawn(bike_actor.run(())),
            tokio::spawn(station_actor.run(station_context)),
            tokio::spawn(account_actor.run(EmailRegistry::new())),
            tokio::spawn(rental_actor.run(())),
        ];

        let coordinator = RentalCoordinator::new(
            bike_client.clone(),
            station_client.clone(),
            account_client.clone(),
            rental_client.clone(),
            clock,
            settings.tariff(),
        );
        info!(tariff = ?settings.tariff(), capacity, "Bike-share system started");

        Self {
            bike_client,
            station_client,
            account_client,
            rental_client,
            coordinator,
            handles,
        }
    }

    /// Drops every client and waits for the actors to drain their mailboxes and stop.
    ///
    /// Clones of the clients or the coordinator held elsewhere keep their actors alive, so
    /// this only returns once those are dropped too.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        drop(self.coordinator);
        drop(self.bike_client);
        drop(self.station_client);
        drop(self.account_client);
        drop(self.rental_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(ShutdownError(format!("{e:?}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
