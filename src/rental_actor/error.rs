//! Error types for the Rental actor.

use thiserror::Error;

use crate::model::RentalId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RentalError {
    #[error("Rental not found: {0}")]
    NotFound(String),

    #[error("Rental {0} is already closed")]
    AlreadyClosed(RentalId),

    #[error("Rental {0} is still open")]
    StillOpen(RentalId),

    #[error("Closed rentals cannot be edited")]
    Immutable,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for RentalError {
    fn from(msg: String) -> Self {
        RentalError::ActorCommunicationError(msg)
    }
}
