//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems. It implements a
//! **Resource-Oriented Architecture (ROA)** on top of the **Actor Model**: every resource
//! type (bikes, stations, accounts, rentals) lives in its own actor that exposes the same
//! repository surface (create, get, list, exists, update, delete) plus resource-specific
//! actions.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain models and their state transitions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and concurrency
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! ```rust
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Station { name: String, slots: usize }
//!
//! #[derive(Debug)] struct StationCreate { name: String, slots: usize }
//! #[derive(Debug)] struct StationUpdate { slots: Option<usize> }
//! #[derive(Debug)] enum StationAction {}
//!
//! #[derive(Debug, thiserror::Error)]
//! enum StationError {
//!     #[error("a station needs at least one slot")]
//!     NoSlots,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Station {
//!     type Id = String;
//!     type Create = StationCreate;
//!     type Update = StationUpdate;
//!     type Action = StationAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = StationError;
//!
//!     fn assign_id(params: &StationCreate, _sequence: u64) -> String { params.name.clone() }
//!
//!     fn from_create_params(name: String, params: StationCreate) -> Result<Self, Self::Error> {
//!         if params.slots == 0 {
//!             return Err(StationError::NoSlots);
//!         }
//!         Ok(Self { name, slots: params.slots })
//!     }
//!
//!     async fn on_update(&mut self, update: StationUpdate, _: &()) -> Result<(), Self::Error> {
//!         if let Some(slots) = update.slots { self.slots = slots; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: StationAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Station>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(StationCreate { name: "Central".into(), slots: 4 }).await.unwrap();
//!     assert_eq!(client.get(id).await.unwrap().unwrap().slots, 4);
//!
//!     // Natural keys are unique per store
//!     let dup = client.create(StationCreate { name: "Central".into(), slots: 2 }).await;
//!     assert!(matches!(dup, Err(FrameworkError::AlreadyExists(_))));
//!
//!     // Entity errors come back boxed and can be recovered
//!     let err = client.create(StationCreate { name: "Empty".into(), slots: 0 }).await.unwrap_err();
//!     assert!(matches!(err.into_entity_error::<StationError>(), Ok(StationError::NoSlots)));
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies and policies are injected at **runtime** via `run(context)`, not at
//! construction time, so actors can be created first and wired afterwards.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor, so a check-then-act inside
//!   one action is atomic
//! - Multiple actors run in **parallel**
//! - No shared mutable state (message passing only)
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real `ResourceClient<T>` backed by a queue of
//! expectations. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
