use crate::domain::cargo::{HandlingEventType, TrackingId};
use crate::domain::location::UnLocode;

// ============================================================================
// Handling Service Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HandlingError {
    #[error("cargo not found: {0}")]
    CargoNotFound(TrackingId),

    #[error("location not found: {0}")]
    LocationNotFound(UnLocode),

    #[error("a voyage number is required for {0:?} events")]
    VoyageRequired(HandlingEventType),

    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
