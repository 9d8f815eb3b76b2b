//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every resource (Bike, Station, Account,
//! Rental, …) must implement to be managed by the generic `ResourceActor`. It specifies
//! associated types for IDs, DTOs, actions, context, and errors, and provides lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Architecture Note
//! By defining a contract (`ActorEntity`) that all our resource types must satisfy, we can
//! write the `ResourceActor` logic *once* and reuse it everywhere.
//!
//! We use "Associated Types" (type Id, type Create, etc.) to enforce type safety.
//! A `Station` entity requires a `StationCreate` payload, and you can't accidentally send it
//! an `AccountCreate` payload.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::rekey`]
//!
//! You do **not** need to implement these methods unless you want to customize behavior.
//! The default implementation does nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g., calling other actors).
/// It also defines a `Context` type, which is injected into every hook. This allows "Late Binding"
/// of dependencies and policies (passing them to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique key for this entity (e.g., a member id, a station name, a sequence number).
    ///
    /// `Ord` keeps `List` results in a stable, ascending order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `UnlockBike`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies or policies) injected into the actor.
    /// Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// The framework enforces a **Per-Actor Error Type** (one enum for the whole actor) rather than
    /// **Per-Message Error Types**. Clients deal with a single `StationError` type, making pattern
    /// matching easier. Errors cross the actor boundary boxed inside
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and can be recovered
    /// with [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Derive the key for a new entity.
    ///
    /// `sequence` is a counter owned by the actor instance, starting at 1 and incremented
    /// for every create request. Entities with a natural key (a member id, a station name)
    /// take it from `params` and ignore the sequence; ledger-style entities use the sequence.
    fn assign_id(params: &Self::Create, sequence: u64) -> Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    /// Use this hook to perform validation against the injected context.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Adopt `new_id` as this entity's key. Called by a rekey request once the actor has
    /// checked that `new_id` is free; returning `false` refuses the move.
    ///
    /// The default refuses, so sequence-keyed entities never change key.
    fn rekey(&mut self, _new_id: &Self::Id) -> bool {
        false
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    ///
    /// The actor handles one request at a time, so a check-then-act sequence inside this
    /// method is atomic with respect to every other request for the same store.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
