//! Domain types for the bike-share system.
//!
//! Each stored entity implements [`ActorEntity`](actor_framework::ActorEntity) in its actor
//! module; the types here hold the state and the state transitions.

pub mod account;
pub mod bike;
pub mod ids;
pub mod money;
pub mod rental;
pub mod slot;
pub mod station;
pub mod tariff;

pub use account::*;
pub use bike::*;
pub use ids::*;
pub use money::*;
pub use rental::*;
pub use slot::*;
pub use station::*;
pub use tariff::*;
