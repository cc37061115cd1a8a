use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::cargo::{
    Cargo, Delivery, HandlingActivity, HandlingEvent, HandlingEventType, HandlingHistory,
    RoutingStatus, TransportStatus,
};

// ============================================================================
// View Assembler - Display Representation of a Cargo
// ============================================================================
//
// A pure, deterministic function of (cargo, ordered handling history).
// The delivery used for rendering is re-derived here rather than read from
// the aggregate, so a view never trusts a stale cached projection. Event
// descriptions are rendered from each event's own completion time, never
// from the wall clock, so the same inputs always render the same view.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoView {
    pub tracking_id: String,
    pub status_text: String,
    pub origin: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<DateTime<Utc>>,
    pub next_expected_activity: String,
    pub misrouted: bool,
    pub routed: bool,
    pub arrival_deadline: DateTime<Utc>,
    pub events: Vec<EventView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legs: Vec<LegView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegView {
    pub voyage_number: String,
    pub from: String,
    pub to: String,
    pub load_time: DateTime<Utc>,
    pub unload_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub description: String,
    pub expected: bool,
}

/// Assemble the display record for one cargo from its aggregate state and
/// the ordered handling history.
pub fn assemble(cargo: &Cargo, history: &HandlingHistory) -> CargoView {
    let delivery = Delivery::derived_from(&cargo.route_specification, &cargo.itinerary, history);

    CargoView {
        tracking_id: cargo.tracking_id.to_string(),
        status_text: status_text(&delivery),
        origin: cargo.route_specification.origin.to_string(),
        destination: cargo.route_specification.destination.to_string(),
        eta: delivery.eta,
        next_expected_activity: next_expected_activity_text(
            delivery.next_expected_activity.as_ref(),
        ),
        misrouted: delivery.routing_status == RoutingStatus::Misrouted,
        routed: !cargo.itinerary.is_empty(),
        arrival_deadline: cargo.route_specification.arrival_deadline,
        events: assemble_events(cargo, history),
        legs: assemble_legs(cargo),
    }
}

fn status_text(delivery: &Delivery) -> String {
    match delivery.transport_status {
        TransportStatus::NotReceived => "Not received".to_string(),
        TransportStatus::InPort => match &delivery.last_known_location {
            Some(location) => format!("In port {}", location),
            None => "In port".to_string(),
        },
        TransportStatus::OnboardCarrier => match &delivery.current_voyage {
            Some(voyage) => format!("Onboard voyage {}", voyage),
            None => "Onboard carrier".to_string(),
        },
        TransportStatus::Claimed => "Claimed".to_string(),
    }
}

fn next_expected_activity_text(activity: Option<&HandlingActivity>) -> String {
    const PREFIX: &str = "Next expected activity is to";

    let Some(activity) = activity else {
        return "There are currently no expected activities for this cargo.".to_string();
    };

    match (activity.event_type, &activity.voyage_number) {
        (HandlingEventType::Load, Some(voyage)) => format!(
            "{} load cargo onto voyage {} in {}.",
            PREFIX, voyage, activity.location
        ),
        (HandlingEventType::Unload, Some(voyage)) => format!(
            "{} unload cargo off of voyage {} in {}.",
            PREFIX, voyage, activity.location
        ),
        (HandlingEventType::Receive, _) => {
            format!("{} receive cargo in {}.", PREFIX, activity.location)
        }
        (HandlingEventType::Claim, _) => {
            format!("{} claim cargo in {}.", PREFIX, activity.location)
        }
        (HandlingEventType::Customs, _) => {
            format!("{} clear customs in {}.", PREFIX, activity.location)
        }
        // Load/unload without a voyage cannot come from an itinerary.
        (HandlingEventType::Load, None) => {
            format!("{} load cargo in {}.", PREFIX, activity.location)
        }
        (HandlingEventType::Unload, None) => {
            format!("{} unload cargo in {}.", PREFIX, activity.location)
        }
    }
}

fn assemble_legs(cargo: &Cargo) -> Vec<LegView> {
    cargo
        .itinerary
        .legs()
        .iter()
        .map(|leg| LegView {
            voyage_number: leg.voyage_number.to_string(),
            from: leg.load_location.to_string(),
            to: leg.unload_location.to_string(),
            load_time: leg.load_time,
            unload_time: leg.unload_time,
        })
        .collect()
}

fn assemble_events(cargo: &Cargo, history: &HandlingHistory) -> Vec<EventView> {
    history
        .events()
        .iter()
        .map(|event| EventView {
            description: event_description(event),
            expected: cargo.itinerary.is_expected(event),
        })
        .collect()
}

/// Reconstructed solely from stored event fields: the timestamp is the
/// event's completion time, not the render time.
fn event_description(event: &HandlingEvent) -> String {
    let completed = event.completion_time.to_rfc3339();
    let location = &event.activity.location;

    match (event.activity.event_type, &event.activity.voyage_number) {
        (HandlingEventType::Receive, _) => {
            format!("Received in {}, at {}.", location, completed)
        }
        (HandlingEventType::Load, Some(voyage)) => {
            format!("Loaded onto voyage {} in {}, at {}.", voyage, location, completed)
        }
        (HandlingEventType::Load, None) => {
            format!("Loaded in {}, at {}.", location, completed)
        }
        (HandlingEventType::Unload, Some(voyage)) => {
            format!("Unloaded off voyage {} in {}, at {}.", voyage, location, completed)
        }
        (HandlingEventType::Unload, None) => {
            format!("Unloaded in {}, at {}.", location, completed)
        }
        (HandlingEventType::Customs, _) => {
            format!("Cleared customs in {}, at {}.", location, completed)
        }
        (HandlingEventType::Claim, _) => {
            format!("Claimed in {}, at {}.", location, completed)
        }
    }
}
