//! # Framework Errors
//!
//! Common error type shared by every actor and client.

use std::error::Error;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Key cannot change: {0}")]
    KeyImmutable(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn Error + Send + Sync>),
}

impl FrameworkError {
    /// Recover the typed entity error carried by [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when this is a framework-level failure or when the
    /// boxed error is of a different type.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|typed| *typed)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("slot {0} is busy")]
    struct SlotBusy(u32);

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn entity_error_round_trips_through_downcast() {
        let err = FrameworkError::EntityError(Box::new(SlotBusy(3)));
        assert_eq!(err.into_entity_error::<SlotBusy>().unwrap(), SlotBusy(3));
    }

    #[test]
    fn mismatched_type_is_returned_untouched() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.into_entity_error::<SlotBusy>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));
        assert_eq!(back.to_string(), "Entity error: other");
    }

    #[test]
    fn framework_failures_are_not_entity_errors() {
        let err = FrameworkError::NotFound("station".into());
        assert!(matches!(
            err.into_entity_error::<SlotBusy>(),
            Err(FrameworkError::NotFound(id)) if id == "station"
        ));
    }
}
