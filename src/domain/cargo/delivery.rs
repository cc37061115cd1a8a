use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::location::UnLocode;
use crate::domain::voyage::VoyageNumber;

use super::handling::{HandlingActivity, HandlingEventType, HandlingHistory};
use super::itinerary::Itinerary;
use super::value_objects::RouteSpecification;

// ============================================================================
// Delivery - Derived Projection of Cargo Progress
// ============================================================================
//
// Delivery is never authoritative state. It is a cache recomputed from
// (route specification, itinerary, handling history) whenever the itinerary
// changes or a handling event arrives, via the pure derived_from function.
// No field is ever set independently, and nothing here reads the wall
// clock, so deriving twice from the same inputs yields identical output.
//
// ============================================================================

/// Current physical state, derived from the latest handling event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportStatus {
    NotReceived,
    InPort,
    OnboardCarrier,
    Claimed,
}

/// Whether the assigned itinerary correctly fulfils the route requirement
/// and the handling observed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingStatus {
    NotRouted,
    Routed,
    Misrouted,
}

/// The derived projection summarizing transport status, routing status,
/// location, and next expected activity for one cargo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub transport_status: TransportStatus,
    pub last_known_location: Option<UnLocode>,
    pub current_voyage: Option<VoyageNumber>,
    pub routing_status: RoutingStatus,
    pub next_expected_activity: Option<HandlingActivity>,
    pub eta: Option<DateTime<Utc>>,
    pub is_misdirected: bool,
}

impl Delivery {
    /// Derive the projection for a cargo that has no handling history yet.
    pub fn initial(spec: &RouteSpecification, itinerary: &Itinerary) -> Self {
        Self::derived_from(spec, itinerary, &HandlingHistory::empty())
    }

    /// Derive the full projection from the route requirement, the assigned
    /// itinerary, and the ordered handling history.
    pub fn derived_from(
        spec: &RouteSpecification,
        itinerary: &Itinerary,
        history: &HandlingHistory,
    ) -> Self {
        let is_misdirected = calculate_misdirection(itinerary, history);
        let routing_status = calculate_routing_status(spec, itinerary, is_misdirected);

        let (transport_status, last_known_location, current_voyage) =
            calculate_transport(history);

        let next_expected_activity = calculate_next_expected_activity(
            spec,
            itinerary,
            history,
            routing_status,
            is_misdirected,
        );

        let eta = if routing_status == RoutingStatus::Routed
            && transport_status != TransportStatus::Claimed
        {
            itinerary.final_arrival_time()
        } else {
            None
        };

        Self {
            transport_status,
            last_known_location,
            current_voyage,
            routing_status,
            next_expected_activity,
            eta,
            is_misdirected,
        }
    }

    /// Routed and the physical handling has not deviated from the itinerary.
    pub fn is_on_track(&self) -> bool {
        self.routing_status == RoutingStatus::Routed && !self.is_misdirected
    }
}

/// An event deviated from the itinerary. Customs events never derive from
/// legs and are tolerated here; itinerary/spec mismatch is tracked
/// separately as routing status for observability.
fn calculate_misdirection(itinerary: &Itinerary, history: &HandlingHistory) -> bool {
    if itinerary.is_empty() {
        return false;
    }

    history
        .events()
        .iter()
        .filter(|event| event.activity.event_type != HandlingEventType::Customs)
        .any(|event| !itinerary.is_expected(event))
}

fn calculate_routing_status(
    spec: &RouteSpecification,
    itinerary: &Itinerary,
    is_misdirected: bool,
) -> RoutingStatus {
    if itinerary.is_empty() {
        return RoutingStatus::NotRouted;
    }
    if !itinerary.satisfies(spec) || is_misdirected {
        return RoutingStatus::Misrouted;
    }
    RoutingStatus::Routed
}

fn calculate_transport(
    history: &HandlingHistory,
) -> (TransportStatus, Option<UnLocode>, Option<VoyageNumber>) {
    let Some(last) = history.most_recently_completed() else {
        return (TransportStatus::NotReceived, None, None);
    };

    match last.activity.event_type {
        HandlingEventType::Load => (
            TransportStatus::OnboardCarrier,
            None,
            last.activity.voyage_number.clone(),
        ),
        HandlingEventType::Receive
        | HandlingEventType::Unload
        | HandlingEventType::Customs => (
            TransportStatus::InPort,
            Some(last.activity.location.clone()),
            None,
        ),
        HandlingEventType::Claim => (
            TransportStatus::Claimed,
            Some(last.activity.location.clone()),
            None,
        ),
    }
}

/// Walk the expected activity sequence to the position immediately after
/// the last expected event in history. Nothing is expected of an unrouted,
/// misrouted or misdirected cargo, and nothing follows the final claim.
fn calculate_next_expected_activity(
    spec: &RouteSpecification,
    itinerary: &Itinerary,
    history: &HandlingHistory,
    routing_status: RoutingStatus,
    is_misdirected: bool,
) -> Option<HandlingActivity> {
    if routing_status != RoutingStatus::Routed || is_misdirected {
        return None;
    }

    let last_expected = history
        .events()
        .iter()
        .rev()
        .find(|event| itinerary.is_expected(event));

    let Some(last_expected) = last_expected else {
        return Some(HandlingActivity::receive(spec.origin.clone()));
    };

    let expected = itinerary.expected_activities();
    let position = expected
        .iter()
        .position(|activity| activity.matches(&last_expected.activity))?;

    expected.get(position + 1).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cargo::handling::HandlingEvent;
    use crate::domain::cargo::itinerary::Leg;
    use crate::domain::cargo::value_objects::TrackingId;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn spec() -> RouteSpecification {
        RouteSpecification::new(
            "SESTO".into(),
            "FIHEL".into(),
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn itinerary() -> Itinerary {
        Itinerary::new(vec![
            Leg::new("V1".into(), "SESTO".into(), "DEHAM".into(), day(1), day(5)).unwrap(),
            Leg::new("V2".into(), "DEHAM".into(), "FIHEL".into(), day(6), day(10)).unwrap(),
        ])
        .unwrap()
    }

    fn history(activities: Vec<HandlingActivity>) -> HandlingHistory {
        let events = activities
            .into_iter()
            .enumerate()
            .map(|(i, activity)| HandlingEvent {
                tracking_id: TrackingId::from("ABC123"),
                activity,
                completion_time: day(i as u32 + 1),
                registration_time: day(i as u32 + 1),
            })
            .collect();
        HandlingHistory::new(events)
    }

    #[test]
    fn test_empty_itinerary_is_not_routed_regardless_of_history() {
        let with_history = history(vec![HandlingActivity::receive("SESTO".into())]);

        for h in [HandlingHistory::empty(), with_history] {
            let delivery = Delivery::derived_from(&spec(), &Itinerary::empty(), &h);
            assert_eq!(delivery.routing_status, RoutingStatus::NotRouted);
            assert!(!delivery.is_misdirected);
            assert_eq!(delivery.next_expected_activity, None);
            assert_eq!(delivery.eta, None);
        }
    }

    #[test]
    fn test_initial_delivery_of_unrouted_cargo() {
        let delivery = Delivery::initial(&spec(), &Itinerary::empty());

        assert_eq!(delivery.transport_status, TransportStatus::NotReceived);
        assert_eq!(delivery.routing_status, RoutingStatus::NotRouted);
        assert_eq!(delivery.last_known_location, None);
        assert_eq!(delivery.current_voyage, None);
    }

    #[test]
    fn test_freshly_assigned_satisfying_itinerary_is_routed() {
        let delivery = Delivery::initial(&spec(), &itinerary());

        assert_eq!(delivery.routing_status, RoutingStatus::Routed);
        assert!(!delivery.is_misdirected);
        assert_eq!(delivery.eta, Some(day(10)));
        assert_eq!(
            delivery.next_expected_activity,
            Some(HandlingActivity::receive("SESTO".into()))
        );
    }

    #[test]
    fn test_itinerary_ending_short_of_destination_is_misrouted() {
        let short = Itinerary::new(vec![Leg::new(
            "V1".into(),
            "SESTO".into(),
            "DEHAM".into(),
            day(1),
            day(5),
        )
        .unwrap()])
        .unwrap();

        let delivery = Delivery::initial(&spec(), &short);

        assert_eq!(delivery.routing_status, RoutingStatus::Misrouted);
        assert!(!delivery.is_misdirected);
        assert_eq!(delivery.eta, None);
        assert_eq!(delivery.next_expected_activity, None);
    }

    #[test]
    fn test_transport_status_progression() {
        let spec = spec();
        let itinerary = itinerary();

        let received = history(vec![HandlingActivity::receive("SESTO".into())]);
        let delivery = Delivery::derived_from(&spec, &itinerary, &received);
        assert_eq!(delivery.transport_status, TransportStatus::InPort);
        assert_eq!(delivery.last_known_location, Some("SESTO".into()));
        assert_eq!(delivery.current_voyage, None);

        let loaded = history(vec![
            HandlingActivity::receive("SESTO".into()),
            HandlingActivity::load("V1".into(), "SESTO".into()),
        ]);
        let delivery = Delivery::derived_from(&spec, &itinerary, &loaded);
        assert_eq!(delivery.transport_status, TransportStatus::OnboardCarrier);
        assert_eq!(delivery.last_known_location, None);
        assert_eq!(delivery.current_voyage, Some("V1".into()));
        assert!(!delivery.is_misdirected);
    }

    #[test]
    fn test_next_expected_after_load_is_unload_at_leg_destination() {
        let loaded = history(vec![
            HandlingActivity::receive("SESTO".into()),
            HandlingActivity::load("V1".into(), "SESTO".into()),
        ]);

        let delivery = Delivery::derived_from(&spec(), &itinerary(), &loaded);

        assert_eq!(
            delivery.next_expected_activity,
            Some(HandlingActivity::unload("V1".into(), "DEHAM".into()))
        );
    }

    #[test]
    fn test_unexpected_event_marks_cargo_misdirected_and_misrouted() {
        let strayed = history(vec![
            HandlingActivity::receive("SESTO".into()),
            HandlingActivity::load("V9".into(), "NLRTM".into()),
        ]);

        let delivery = Delivery::derived_from(&spec(), &itinerary(), &strayed);

        assert!(delivery.is_misdirected);
        assert_eq!(delivery.routing_status, RoutingStatus::Misrouted);
        assert_eq!(delivery.next_expected_activity, None);
        assert_eq!(delivery.eta, None);
        assert!(!delivery.is_on_track());
    }

    #[test]
    fn test_customs_is_tolerated() {
        let cleared = history(vec![
            HandlingActivity::receive("SESTO".into()),
            HandlingActivity::customs("SESTO".into()),
        ]);

        let delivery = Delivery::derived_from(&spec(), &itinerary(), &cleared);

        assert!(!delivery.is_misdirected);
        assert_eq!(delivery.routing_status, RoutingStatus::Routed);
        assert_eq!(delivery.transport_status, TransportStatus::InPort);
        // Customs does not advance the expected sequence.
        assert_eq!(
            delivery.next_expected_activity,
            Some(HandlingActivity::load("V1".into(), "SESTO".into()))
        );
    }

    #[test]
    fn test_claimed_cargo_expects_nothing_further() {
        let complete = history(vec![
            HandlingActivity::receive("SESTO".into()),
            HandlingActivity::load("V1".into(), "SESTO".into()),
            HandlingActivity::unload("V1".into(), "DEHAM".into()),
            HandlingActivity::load("V2".into(), "DEHAM".into()),
            HandlingActivity::unload("V2".into(), "FIHEL".into()),
            HandlingActivity::claim("FIHEL".into()),
        ]);

        let delivery = Delivery::derived_from(&spec(), &itinerary(), &complete);

        assert_eq!(delivery.transport_status, TransportStatus::Claimed);
        assert_eq!(delivery.next_expected_activity, None);
        assert_eq!(delivery.eta, None);
        assert_eq!(delivery.last_known_location, Some("FIHEL".into()));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let spec = spec();
        let itinerary = itinerary();
        let history = history(vec![
            HandlingActivity::receive("SESTO".into()),
            HandlingActivity::load("V1".into(), "SESTO".into()),
        ]);

        let first = Delivery::derived_from(&spec, &itinerary, &history);
        let second = Delivery::derived_from(&spec, &itinerary, &history);

        assert_eq!(first, second);
    }
}
