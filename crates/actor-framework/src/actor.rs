//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a keyed store of
//! entities. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and ensuring exclusive access to the store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// ## ResourceActor
///
/// The `ResourceActor<T>` struct is the *server* side of the framework. It owns the in‑memory
/// store for a given entity type `T: ActorEntity` and processes all incoming `ResourceRequest<T>`
/// messages sequentially. Each actor runs in its own Tokio task, guaranteeing exclusive access
/// to its state without any locking.
///
/// * **Concurrency model** – one message at a time, so an entity's check-then-act logic
///   inside `handle_action` can never interleave with another request.
/// * **Context injection** – a user‑provided `Context` is passed to every lifecycle hook.
/// * **Scoped ids** – the sequence handed to [`ActorEntity::assign_id`] belongs to this
///   instance; two stores never share a counter.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Dock { id: u64 }
/// #[derive(Debug)] struct DockCreate;
/// #[derive(Debug)] struct DockUpdate;
/// #[derive(Debug)] enum DockAction {}
/// #[derive(Debug, thiserror::Error)] #[error("dock error")] struct DockError;
///
/// #[async_trait]
/// impl ActorEntity for Dock {
///     type Id = u64;
///     type Create = DockCreate;
///     type Update = DockUpdate;
///     type Action = DockAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = DockError;
///
///     fn assign_id(_: &DockCreate, sequence: u64) -> u64 { sequence }
///     fn from_create_params(id: u64, _: DockCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: DockUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: DockAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Dock>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(DockCreate).await.unwrap();
///     assert_eq!(id, 1);
///     assert!(client.exists(id).await.unwrap());
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: asks the entity for its key, rejects a taken key with
///   [`FrameworkError::AlreadyExists`], builds the entity, runs `on_create`, stores it.
/// * **Get** / **Exists**: read-only lookups by key.
/// * **List**: clones every entity in ascending key order.
/// * **Update**: runs `on_update` against the stored entity and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Rekey**: moves the entity to a free key if [`ActorEntity::rekey`] accepts it.
/// * **Action**: runs `handle_action` and returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    sequence: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is full,
    /// calls to the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            sequence: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Station" rather than "bike_share::model::station::Station"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::assign_id(&params, self.sequence);
                    self.sequence += 1;

                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Duplicate key");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Exists { id, respond_to } => {
                    let found = self.store.contains_key(&id);
                    debug!(entity_type, %id, found, "Exists");
                    let _ = respond_to.send(Ok(found));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Rekey {
                    id,
                    new_id,
                    respond_to,
                } => {
                    debug!(entity_type, %id, %new_id, "Rekey");
                    let Some(mut item) = self.store.remove(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if self.store.contains_key(&new_id) || new_id == id {
                        self.store.insert(id, item);
                        warn!(entity_type, %new_id, "Duplicate key");
                        let _ =
                            respond_to.send(Err(FrameworkError::AlreadyExists(new_id.to_string())));
                        continue;
                    }
                    if !item.rekey(&new_id) {
                        warn!(entity_type, %id, "Key is immutable");
                        let _ = respond_to.send(Err(FrameworkError::KeyImmutable(id.to_string())));
                        self.store.insert(id, item);
                        continue;
                    }
                    self.store.insert(new_id.clone(), item);
                    info!(entity_type, %id, %new_id, "Rekeyed");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
