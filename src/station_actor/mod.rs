//! # Station Actor
//!
//! Owns every station and its slots. Docking and undocking are actions on this actor,
//! so two requests for the same slot are always handled one after the other.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Station`]
//! - [`context`] - [`StationContext`]: slot limit and the unlock-code generator
//! - [`error`] - [`StationError`]
//! - [`actions`] - [`StationAction`] and [`StationActionResult`]
//!
//! ## Usage
//!
//! ```rust
//! use bike_share::model::{BikeId, StationCreate, StationName};
//! use bike_share::station_actor::{self, StationContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = station_actor::new(8);
//!     tokio::spawn(actor.run(StationContext::seeded(16, 42)));
//!
//!     let name = client
//!         .create_station(StationCreate {
//!             name: StationName::from("Central"),
//!             address: "1 Main St".to_string(),
//!             slot_count: 4,
//!         })
//!         .await?;
//!     let password = client.lock_bike(name.clone(), 1, BikeId::from("B-1")).await?;
//!     let slot = client.unlock_bike(name, password, BikeId::from("B-1")).await?;
//!     assert_eq!(slot, 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod context;
pub mod entity;
pub mod error;

pub use actions::*;
pub use context::*;
pub use error::*;

use crate::model::Station;
use actor_framework::ResourceActor;

/// Creates a new Station actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Station>, crate::clients::StationClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, crate::clients::StationClient::new(generic_client))
}
