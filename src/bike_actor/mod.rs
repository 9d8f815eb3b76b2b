//! # Bike Actor
//!
//! Owns the fleet. Its actions are the compare-and-swap steps the rental flow relies on:
//! `MarkRented` only succeeds on an Available bike, so two renters racing for the same
//! bike cannot both win.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Bike`]
//! - [`error`] - [`BikeError`]
//! - [`actions`] - [`BikeAction`] and [`BikeActionResult`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Bike;
use actor_framework::ResourceActor;

/// Creates a new Bike actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Bike>, crate::clients::BikeClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, crate::clients::BikeClient::new(generic_client))
}
