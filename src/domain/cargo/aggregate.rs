use serde::{Deserialize, Serialize};

use super::delivery::Delivery;
use super::handling::HandlingHistory;
use super::itinerary::Itinerary;
use super::value_objects::{RouteSpecification, TrackingId};

// ============================================================================
// Cargo Aggregate - Root of the Tracking Domain
// ============================================================================
//
// Identity is the tracking id. The delivery field is a derived cache: every
// mutation entry point re-derives it from the current specification,
// itinerary and the supplied handling history, so it can never drift from
// its inputs. Cargo is never deleted.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub tracking_id: TrackingId,
    pub route_specification: RouteSpecification,
    pub itinerary: Itinerary,
    pub delivery: Delivery,
}

impl Cargo {
    /// A freshly booked cargo: no itinerary assigned, nothing handled yet.
    pub fn new(tracking_id: TrackingId, route_specification: RouteSpecification) -> Self {
        let delivery = Delivery::initial(&route_specification, &Itinerary::empty());
        Self {
            tracking_id,
            route_specification,
            itinerary: Itinerary::empty(),
            delivery,
        }
    }

    /// Assign the cargo to a route. The projection is re-derived against
    /// the handling observed so far; no satisfies-check happens here, a
    /// mismatch surfaces as Misrouted.
    pub fn assign_to_route(&mut self, itinerary: Itinerary, history: &HandlingHistory) {
        self.itinerary = itinerary;
        self.derive_delivery_progress(history);
    }

    /// Replace the route specification (e.g. a destination change). The
    /// existing itinerary is retained; if it no longer satisfies the new
    /// specification the projection reports Misrouted.
    pub fn specify_new_route(
        &mut self,
        route_specification: RouteSpecification,
        history: &HandlingHistory,
    ) {
        self.route_specification = route_specification;
        self.derive_delivery_progress(history);
    }

    /// Recompute the delivery projection from current state and history.
    /// Called after every mutation and whenever a handling event arrives.
    pub fn derive_delivery_progress(&mut self, history: &HandlingHistory) {
        self.delivery =
            Delivery::derived_from(&self.route_specification, &self.itinerary, history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cargo::delivery::{RoutingStatus, TransportStatus};
    use crate::domain::cargo::handling::{HandlingActivity, HandlingEvent};
    use crate::domain::cargo::itinerary::Leg;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn new_cargo() -> Cargo {
        let spec = RouteSpecification::new(
            "SESTO".into(),
            "FIHEL".into(),
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        Cargo::new(TrackingId::from("ABC123"), spec)
    }

    fn itinerary() -> Itinerary {
        Itinerary::new(vec![
            Leg::new("V1".into(), "SESTO".into(), "DEHAM".into(), day(1), day(5)).unwrap(),
            Leg::new("V2".into(), "DEHAM".into(), "FIHEL".into(), day(6), day(10)).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_cargo_starts_unrouted_and_unreceived() {
        let cargo = new_cargo();
        assert!(cargo.itinerary.is_empty());
        assert_eq!(cargo.delivery.transport_status, TransportStatus::NotReceived);
        assert_eq!(cargo.delivery.routing_status, RoutingStatus::NotRouted);
    }

    #[test]
    fn test_assign_to_route_rederives_projection() {
        let mut cargo = new_cargo();
        cargo.assign_to_route(itinerary(), &HandlingHistory::empty());

        assert_eq!(cargo.delivery.routing_status, RoutingStatus::Routed);
        assert_eq!(cargo.delivery.eta, Some(day(10)));
    }

    #[test]
    fn test_destination_change_keeps_itinerary_and_surfaces_misrouting() {
        let mut cargo = new_cargo();
        cargo.assign_to_route(itinerary(), &HandlingHistory::empty());

        let new_spec = cargo
            .route_specification
            .with_destination("NLRTM".into())
            .unwrap();
        cargo.specify_new_route(new_spec, &HandlingHistory::empty());

        assert!(!cargo.itinerary.is_empty());
        assert_eq!(cargo.delivery.routing_status, RoutingStatus::Misrouted);
        assert!(!cargo.delivery.is_misdirected);
    }

    #[test]
    fn test_derive_delivery_progress_tracks_new_events() {
        let mut cargo = new_cargo();
        cargo.assign_to_route(itinerary(), &HandlingHistory::empty());

        let history = HandlingHistory::new(vec![HandlingEvent {
            tracking_id: cargo.tracking_id.clone(),
            activity: HandlingActivity::receive("SESTO".into()),
            completion_time: day(1),
            registration_time: day(1),
        }]);
        cargo.derive_delivery_progress(&history);

        assert_eq!(cargo.delivery.transport_status, TransportStatus::InPort);
        assert_eq!(cargo.delivery.last_known_location, Some("SESTO".into()));
    }
}
