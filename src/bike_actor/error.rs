//! Error types for the Bike actor.

use thiserror::Error;

use crate::model::{BikeId, BikeStatus};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BikeError {
    #[error("Bike not found: {0}")]
    NotFound(String),

    #[error("Bike already registered: {0}")]
    AlreadyExists(String),

    #[error("Bike id must not be empty")]
    EmptyId,

    /// The bike is not in the status the transition starts from.
    #[error("Bike {id} is {from:?}, cannot become {to:?}")]
    InvalidTransition {
        id: BikeId,
        from: BikeStatus,
        to: BikeStatus,
    },

    #[error("Bike {id} is {status:?}")]
    Unavailable { id: BikeId, status: BikeStatus },

    #[error("Bike {0} is already docked")]
    AlreadyDocked(BikeId),

    #[error("Bike {0} is rented or docked")]
    InUse(BikeId),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for BikeError {
    fn from(msg: String) -> Self {
        BikeError::ActorCommunicationError(msg)
    }
}
