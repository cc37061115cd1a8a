use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::cargo::{
    Cargo, Itinerary, RouteSpecification, TrackingId, TrackingIdGenerator,
};
use crate::domain::location::{Location, UnLocode};
use crate::routing::RoutingService;
use crate::store::{CargoRepository, HandlingEventRepository, LocationRepository};
use crate::utils::KeyedLock;

use super::errors::BookingError;
use super::views::{assemble, CargoView};

// ============================================================================
// Booking Service
// ============================================================================
//
// Load, mutate, re-derive, persist. Mutating operations hold the cargo's
// keyed lock across the whole cycle; reads run concurrently against their
// own snapshot.
//
// ============================================================================

pub struct BookingService {
    cargos: Arc<dyn CargoRepository>,
    locations: Arc<dyn LocationRepository>,
    handling_events: Arc<dyn HandlingEventRepository>,
    routing: Arc<dyn RoutingService>,
    tracking_ids: Arc<dyn TrackingIdGenerator>,
    mutation_locks: Arc<KeyedLock<TrackingId>>,
}

impl BookingService {
    pub fn new(
        cargos: Arc<dyn CargoRepository>,
        locations: Arc<dyn LocationRepository>,
        handling_events: Arc<dyn HandlingEventRepository>,
        routing: Arc<dyn RoutingService>,
        tracking_ids: Arc<dyn TrackingIdGenerator>,
        mutation_locks: Arc<KeyedLock<TrackingId>>,
    ) -> Self {
        Self {
            cargos,
            locations,
            handling_events,
            routing,
            tracking_ids,
            mutation_locks,
        }
    }

    /// Register a new cargo in the tracking system, not yet routed.
    pub async fn book_new_cargo(
        &self,
        origin: UnLocode,
        destination: UnLocode,
        arrival_deadline: DateTime<Utc>,
    ) -> Result<TrackingId, BookingError> {
        let route_specification =
            RouteSpecification::new(origin, destination, arrival_deadline)?;

        let tracking_id = self.tracking_ids.next_id();
        let cargo = Cargo::new(tracking_id.clone(), route_specification);
        self.cargos.store(cargo).await?;

        tracing::info!(tracking_id = %tracking_id, "Booked new cargo");
        Ok(tracking_id)
    }

    /// Candidate itineraries for a cargo. An unknown tracking id yields an
    /// empty list, not an error: callers probe freely.
    pub async fn request_possible_routes_for_cargo(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Vec<Itinerary>, BookingError> {
        let Some(cargo) = self.cargos.find(tracking_id).await? else {
            return Ok(Vec::new());
        };

        let routes = self
            .routing
            .fetch_routes_for_specification(&cargo.route_specification)
            .await?;
        Ok(routes)
    }

    /// Assign a cargo to the route specified by the itinerary. Whether the
    /// itinerary actually satisfies the route specification is not checked
    /// here; a mismatch surfaces as Misrouted in the projection.
    pub async fn assign_cargo_to_route(
        &self,
        tracking_id: &TrackingId,
        itinerary: Itinerary,
    ) -> Result<(), BookingError> {
        let _guard = self.mutation_locks.acquire(tracking_id).await;

        let mut cargo = self
            .cargos
            .find(tracking_id)
            .await?
            .ok_or_else(|| BookingError::CargoNotFound(tracking_id.clone()))?;

        let history = self
            .handling_events
            .query_handling_history(tracking_id)
            .await?;
        cargo.assign_to_route(itinerary, &history);

        let routing_status = cargo.delivery.routing_status;
        self.cargos.store(cargo).await?;

        tracing::info!(
            tracking_id = %tracking_id,
            routing_status = ?routing_status,
            "Assigned cargo to route"
        );
        Ok(())
    }

    /// Change the destination of a cargo. Origin and arrival deadline are
    /// preserved; the existing itinerary is retained even if it no longer
    /// satisfies the new requirement, which derivation surfaces as
    /// Misrouted.
    pub async fn change_destination(
        &self,
        tracking_id: &TrackingId,
        destination: UnLocode,
    ) -> Result<(), BookingError> {
        let _guard = self.mutation_locks.acquire(tracking_id).await;

        let mut cargo = self
            .cargos
            .find(tracking_id)
            .await?
            .ok_or_else(|| BookingError::CargoNotFound(tracking_id.clone()))?;

        let location = self
            .locations
            .find(&destination)
            .await?
            .ok_or_else(|| BookingError::LocationNotFound(destination))?;

        let route_specification = cargo
            .route_specification
            .with_destination(location.un_locode)?;

        let history = self
            .handling_events
            .query_handling_history(tracking_id)
            .await?;
        cargo.specify_new_route(route_specification, &history);

        let routing_status = cargo.delivery.routing_status;
        self.cargos.store(cargo).await?;

        tracing::info!(
            tracking_id = %tracking_id,
            routing_status = ?routing_status,
            "Changed cargo destination"
        );
        Ok(())
    }

    /// All booked cargos, each rendered from its own history snapshot.
    pub async fn cargos(&self) -> Result<Vec<CargoView>, BookingError> {
        let cargos = self.cargos.find_all().await?;

        let mut views = Vec::with_capacity(cargos.len());
        for cargo in &cargos {
            let history = self
                .handling_events
                .query_handling_history(&cargo.tracking_id)
                .await?;
            views.push(assemble(cargo, &history));
        }
        Ok(views)
    }

    /// All registered locations.
    pub async fn locations(&self) -> Result<Vec<Location>, BookingError> {
        Ok(self.locations.find_all().await?)
    }
}
