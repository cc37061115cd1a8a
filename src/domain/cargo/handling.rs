use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::location::UnLocode;
use crate::domain::voyage::VoyageNumber;

use super::value_objects::TrackingId;

// ============================================================================
// Handling - Physical Handling of Cargo
// ============================================================================
//
// Handling events are immutable facts: once a cargo has been received,
// loaded, unloaded, cleared through customs or claimed, that record never
// changes. Derivation order is completion time ascending, registration
// time as tie-break, enforced by HandlingHistory on construction.
//
// ============================================================================

/// The kind of physical handling that happened to a cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlingEventType {
    Receive,
    Load,
    Unload,
    Customs,
    Claim,
}

/// A handling step: what happened, where, and (for load/unload) on which
/// voyage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingActivity {
    pub event_type: HandlingEventType,
    pub location: UnLocode,
    pub voyage_number: Option<VoyageNumber>,
}

impl HandlingActivity {
    pub fn receive(location: UnLocode) -> Self {
        Self {
            event_type: HandlingEventType::Receive,
            location,
            voyage_number: None,
        }
    }

    pub fn load(voyage_number: VoyageNumber, location: UnLocode) -> Self {
        Self {
            event_type: HandlingEventType::Load,
            location,
            voyage_number: Some(voyage_number),
        }
    }

    pub fn unload(voyage_number: VoyageNumber, location: UnLocode) -> Self {
        Self {
            event_type: HandlingEventType::Unload,
            location,
            voyage_number: Some(voyage_number),
        }
    }

    pub fn customs(location: UnLocode) -> Self {
        Self {
            event_type: HandlingEventType::Customs,
            location,
            voyage_number: None,
        }
    }

    pub fn claim(location: UnLocode) -> Self {
        Self {
            event_type: HandlingEventType::Claim,
            location,
            voyage_number: None,
        }
    }

    /// Whether two activities describe the same handling step. Voyage
    /// numbers only discriminate load and unload activities.
    pub fn matches(&self, other: &HandlingActivity) -> bool {
        if self.event_type != other.event_type || self.location != other.location {
            return false;
        }

        match self.event_type {
            HandlingEventType::Load | HandlingEventType::Unload => {
                self.voyage_number == other.voyage_number
            }
            _ => true,
        }
    }
}

/// An immutable record of a physical handling action. Completion time is
/// when the action happened in the real world; registration time is when
/// the system learned of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingEvent {
    pub tracking_id: TrackingId,
    pub activity: HandlingActivity,
    pub completion_time: DateTime<Utc>,
    pub registration_time: DateTime<Utc>,
}

/// The chronologically ordered handling events for one cargo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HandlingHistory {
    events: Vec<HandlingEvent>,
}

impl HandlingHistory {
    /// Build a history, sorting by completion time ascending with
    /// registration time as tie-break.
    pub fn new(mut events: Vec<HandlingEvent>) -> Self {
        events.sort_by(|a, b| {
            a.completion_time
                .cmp(&b.completion_time)
                .then(a.registration_time.cmp(&b.registration_time))
        });
        Self { events }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HandlingEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn most_recently_completed(&self) -> Option<&HandlingEvent> {
        self.events.last()
    }
}
