//! # Account Actor
//!
//! Owns member accounts: identity, balance and the rental state machine. The actions
//! here are the per-account guards of the rent and return flows.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Account`]
//! - [`registry`] - [`EmailRegistry`], keeps email addresses unique across accounts
//! - [`error`] - [`AccountError`]
//! - [`actions`] - [`AccountAction`] and [`AccountActionResult`]

pub mod actions;
pub mod entity;
pub mod error;
pub mod registry;

pub use actions::*;
pub use error::*;
pub use registry::*;

use crate::model::Account;
use actor_framework::ResourceActor;

/// Creates a new Account actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Account>, crate::clients::AccountClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, crate::clients::AccountClient::new(generic_client))
}
