//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client maps framework failures into its actor's error type. Entity errors come
//! back as the typed variant the actor raised; transport failures become
//! `ActorCommunicationError`.

pub mod account_client;
pub mod bike_client;
pub mod rental_client;
pub mod station_client;

pub use account_client::*;
pub use bike_client::*;
pub use rental_client::*;
pub use station_client::*;
