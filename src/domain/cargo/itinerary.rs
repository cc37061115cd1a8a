use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::location::UnLocode;
use crate::domain::voyage::VoyageNumber;

use super::errors::CargoError;
use super::handling::{HandlingActivity, HandlingEvent, HandlingEventType};
use super::value_objects::RouteSpecification;

// ============================================================================
// Itinerary - Assigned Route and Expected Handling
// ============================================================================
//
// An itinerary is the ordered transport legs assigned to fulfil a route
// specification. It answers two questions for the derivation engine:
// does this itinerary satisfy the route requirement, and is a given
// handling event expected along it.
//
// ============================================================================

/// One voyage segment: load here, unload there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub voyage_number: VoyageNumber,
    pub load_location: UnLocode,
    pub unload_location: UnLocode,
    pub load_time: DateTime<Utc>,
    pub unload_time: DateTime<Utc>,
}

impl Leg {
    pub fn new(
        voyage_number: VoyageNumber,
        load_location: UnLocode,
        unload_location: UnLocode,
        load_time: DateTime<Utc>,
        unload_time: DateTime<Utc>,
    ) -> Result<Self, CargoError> {
        if unload_time <= load_time {
            return Err(CargoError::LegTimesOutOfOrder {
                load: load_time,
                unload: unload_time,
            });
        }

        Ok(Self {
            voyage_number,
            load_location,
            unload_location,
            load_time,
            unload_time,
        })
    }
}

/// Ordered transport legs assigned to a cargo. Empty until a route has
/// been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    legs: Vec<Leg>,
}

impl Itinerary {
    /// Build an itinerary, rejecting disjoint legs and legs whose times
    /// overlap. Malformed itineraries are never silently accepted.
    pub fn new(legs: Vec<Leg>) -> Result<Self, CargoError> {
        for pair in legs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            if prev.unload_location != next.load_location {
                return Err(CargoError::DisjointLegs {
                    unload_location: prev.unload_location.clone(),
                    load_location: next.load_location.clone(),
                });
            }
            if next.load_time < prev.unload_time {
                return Err(CargoError::OverlappingLegTimes {
                    unload: prev.unload_time,
                    load: next.load_time,
                });
            }
        }

        Ok(Self { legs })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn final_arrival_location(&self) -> Option<&UnLocode> {
        self.legs.last().map(|leg| &leg.unload_location)
    }

    pub fn final_arrival_time(&self) -> Option<DateTime<Utc>> {
        self.legs.last().map(|leg| leg.unload_time)
    }

    /// Whether this itinerary fulfils the route specification: first leg
    /// loads at the origin, last leg unloads at the destination, and
    /// arrival is no later than the deadline. An empty itinerary satisfies
    /// nothing.
    pub fn satisfies(&self, spec: &RouteSpecification) -> bool {
        match (self.legs.first(), self.legs.last()) {
            (Some(first), Some(last)) => {
                first.load_location == spec.origin
                    && last.unload_location == spec.destination
                    && last.unload_time <= spec.arrival_deadline
            }
            _ => false,
        }
    }

    /// The full sequence of handling activities this itinerary expects:
    /// an implicit receive at the first load location, load then unload
    /// per leg, and an implicit claim at the final unload location.
    pub fn expected_activities(&self) -> Vec<HandlingActivity> {
        let (Some(first), Some(last)) = (self.legs.first(), self.legs.last()) else {
            return Vec::new();
        };

        let mut activities = Vec::with_capacity(self.legs.len() * 2 + 2);
        activities.push(HandlingActivity::receive(first.load_location.clone()));

        for leg in &self.legs {
            activities.push(HandlingActivity::load(
                leg.voyage_number.clone(),
                leg.load_location.clone(),
            ));
            activities.push(HandlingActivity::unload(
                leg.voyage_number.clone(),
                leg.unload_location.clone(),
            ));
        }

        activities.push(HandlingActivity::claim(last.unload_location.clone()));
        activities
    }

    /// Whether a handling event is expected anywhere along this itinerary.
    /// Customs events never derive from legs and are never expected; the
    /// derivation engine tolerates them separately.
    pub fn is_expected(&self, event: &HandlingEvent) -> bool {
        if event.activity.event_type == HandlingEventType::Customs {
            return false;
        }

        self.expected_activities()
            .iter()
            .any(|expected| expected.matches(&event.activity))
    }
}
