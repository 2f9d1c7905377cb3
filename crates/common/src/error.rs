use thiserror::Error;
use uuid::Uuid;

/// Errors that abort a broadcast before any recipient is contacted.
///
/// Only the resolution stage propagates to the caller; dispatch-stage
/// failures are recorded per recipient as [`DeliveryError`] values and never
/// surface as an `Err` from the engine.
#[derive(Debug, Error)]
pub enum FanoutError {
    #[error("Failed to resolve recipient set: {0}")]
    Resolution(#[source] sqlx::Error),
}

/// A single recipient/channel delivery failure.
///
/// Terminal for that recipient/channel pair; the engine does not retry.
/// Carried as a value inside a `DeliveryOutcome`, logged, then dropped.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Push delivery failed for recipient {recipient_id}: {cause}")]
    PushDeliveryFailed { recipient_id: Uuid, cause: String },

    #[error("In-app persist failed for recipient {recipient_id}: {cause}")]
    InAppPersistFailed { recipient_id: Uuid, cause: String },
}
