//! # Rental Actor
//!
//! The rental ledger. Rentals are numbered from this actor's own sequence, so two
//! systems running side by side (two tests, say) never share ids.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Rental;
use actor_framework::ResourceActor;

/// Creates a new Rental actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Rental>, crate::clients::RentalClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, crate::clients::RentalClient::new(generic_client))
}
