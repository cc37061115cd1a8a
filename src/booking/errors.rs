use crate::domain::cargo::{CargoError, TrackingId};
use crate::domain::location::UnLocode;

// ============================================================================
// Booking Service Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("cargo not found: {0}")]
    CargoNotFound(TrackingId),

    #[error("location not found: {0}")]
    LocationNotFound(UnLocode),

    #[error(transparent)]
    Invariant(#[from] CargoError),

    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
