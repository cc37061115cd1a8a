use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::location::UnLocode;

use super::errors::CargoError;

// ============================================================================
// Cargo Value Objects
// ============================================================================

/// Uniquely identifies a cargo booking. Generated once at booking time,
/// immutable, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(String);

impl TrackingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Allocates tracking identities. Process-wide identity generation is
/// isolated behind this trait so services can be tested with fixed ids.
pub trait TrackingIdGenerator: Send + Sync {
    fn next_id(&self) -> TrackingId;
}

/// Default generator: first group of a v4 UUID, uppercased (e.g. "9A8B1C2D").
pub struct UuidTrackingIdGenerator;

impl TrackingIdGenerator for UuidTrackingIdGenerator {
    fn next_id(&self) -> TrackingId {
        let id = Uuid::new_v4().to_string();
        let short = id.split('-').next().unwrap_or(&id);
        TrackingId::new(short.to_uppercase())
    }
}

/// Where a cargo must travel from and to, and by when. Immutable: changing
/// the destination produces a new specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpecification {
    pub origin: UnLocode,
    pub destination: UnLocode,
    pub arrival_deadline: DateTime<Utc>,
}

impl RouteSpecification {
    pub fn new(
        origin: UnLocode,
        destination: UnLocode,
        arrival_deadline: DateTime<Utc>,
    ) -> Result<Self, CargoError> {
        if origin == destination {
            return Err(CargoError::OriginEqualsDestination(origin));
        }

        Ok(Self {
            origin,
            destination,
            arrival_deadline,
        })
    }

    /// A copy of this specification with the destination swapped. Origin and
    /// arrival deadline are preserved.
    pub fn with_destination(&self, destination: UnLocode) -> Result<Self, CargoError> {
        Self::new(self.origin.clone(), destination, self.arrival_deadline)
    }
}
