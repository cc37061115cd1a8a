use crate::domain::location::UnLocode;
use chrono::{DateTime, Utc};

// ============================================================================
// Cargo Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CargoError {
    #[error("route origin and destination must differ: {0}")]
    OriginEqualsDestination(UnLocode),

    #[error("leg unload time {unload} must be after load time {load}")]
    LegTimesOutOfOrder {
        load: DateTime<Utc>,
        unload: DateTime<Utc>,
    },

    #[error("itinerary legs are disjoint: unload at {unload_location} followed by load at {load_location}")]
    DisjointLegs {
        unload_location: UnLocode,
        load_location: UnLocode,
    },

    #[error("itinerary leg loads at {load} before the previous leg unloads at {unload}")]
    OverlappingLegTimes {
        unload: DateTime<Utc>,
        load: DateTime<Utc>,
    },
}
