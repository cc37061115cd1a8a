use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::cargo::{
    HandlingActivity, HandlingEvent, HandlingEventType, TrackingId,
};
use crate::domain::location::UnLocode;
use crate::domain::voyage::VoyageNumber;
use crate::store::{CargoRepository, HandlingEventRepository, LocationRepository};
use crate::utils::KeyedLock;

use super::errors::HandlingError;

// ============================================================================
// Handling Event Service
// ============================================================================
//
// Registration is two steps: store the immutable event, then inspect the
// cargo - re-derive its delivery from the full history and persist it.
// The inspection holds the cargo's keyed lock so event arrival cannot race
// route assignment or destination changes.
//
// ============================================================================

pub struct HandlingEventService {
    cargos: Arc<dyn CargoRepository>,
    locations: Arc<dyn LocationRepository>,
    handling_events: Arc<dyn HandlingEventRepository>,
    mutation_locks: Arc<KeyedLock<TrackingId>>,
}

impl HandlingEventService {
    pub fn new(
        cargos: Arc<dyn CargoRepository>,
        locations: Arc<dyn LocationRepository>,
        handling_events: Arc<dyn HandlingEventRepository>,
        mutation_locks: Arc<KeyedLock<TrackingId>>,
    ) -> Self {
        Self {
            cargos,
            locations,
            handling_events,
            mutation_locks,
        }
    }

    /// Register that a cargo was handled. Load and unload reports must name
    /// the voyage; voyage numbers on other reports are ignored.
    pub async fn register_handling_event(
        &self,
        completion_time: DateTime<Utc>,
        tracking_id: TrackingId,
        voyage_number: Option<VoyageNumber>,
        location: UnLocode,
        event_type: HandlingEventType,
    ) -> Result<(), HandlingError> {
        if self.cargos.find(&tracking_id).await?.is_none() {
            return Err(HandlingError::CargoNotFound(tracking_id));
        }
        if self.locations.find(&location).await?.is_none() {
            return Err(HandlingError::LocationNotFound(location));
        }

        let activity = build_activity(event_type, location, voyage_number)?;
        let event = HandlingEvent {
            tracking_id: tracking_id.clone(),
            activity,
            completion_time,
            registration_time: Utc::now(),
        };
        self.handling_events.store(event).await?;

        tracing::info!(
            tracking_id = %tracking_id,
            event_type = ?event_type,
            "Registered handling event"
        );

        self.inspect_cargo(&tracking_id).await
    }

    /// Re-derive the cargo's delivery projection from the full handling
    /// history and persist it.
    async fn inspect_cargo(&self, tracking_id: &TrackingId) -> Result<(), HandlingError> {
        let _guard = self.mutation_locks.acquire(tracking_id).await;

        let Some(mut cargo) = self.cargos.find(tracking_id).await? else {
            // The cargo was checked above; a repository losing it mid-flight
            // is a collaborator problem, reported as such.
            return Err(HandlingError::CargoNotFound(tracking_id.clone()));
        };

        let history = self
            .handling_events
            .query_handling_history(tracking_id)
            .await?;
        cargo.derive_delivery_progress(&history);

        if cargo.delivery.is_misdirected {
            tracing::warn!(tracking_id = %tracking_id, "Cargo is misdirected");
        }

        self.cargos.store(cargo).await?;
        Ok(())
    }
}

fn build_activity(
    event_type: HandlingEventType,
    location: UnLocode,
    voyage_number: Option<VoyageNumber>,
) -> Result<HandlingActivity, HandlingError> {
    match event_type {
        HandlingEventType::Load | HandlingEventType::Unload => {
            let voyage_number =
                voyage_number.ok_or(HandlingError::VoyageRequired(event_type))?;
            Ok(HandlingActivity {
                event_type,
                location,
                voyage_number: Some(voyage_number),
            })
        }
        _ => Ok(HandlingActivity {
            event_type,
            location,
            voyage_number: None,
        }),
    }
}
