//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # The Repository Pattern
/// The variants map to the capability set every store offers, whatever it holds:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource. Fails if the key is taken.
/// - **Get**: Fetches the current state of the resource by ID.
/// - **List**: Fetches every resource, in ascending key order.
/// - **Exists**: Cheap existence check by ID.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing resource.
/// - **Delete**: Removes the resource.
/// - **Rekey**: Moves the resource to a new key, for entities keyed by a renameable name.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
///
/// This type is generic over `T: ActorEntity`, so you can't send a "Station Create" payload
/// to an "Account" actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Exists {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Rekey {
        id: T::Id,
        new_id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
