use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::cargo::{Cargo, HandlingEvent, HandlingHistory, TrackingId};
use crate::domain::location::{Location, UnLocode};

use super::{CargoRepository, HandlingEventRepository, LocationRepository};

// ============================================================================
// In-Memory Repositories
// ============================================================================
//
// Readers take the read guard and clone, so every read observes a
// consistent snapshot as of its own read while writers proceed.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryCargoRepository {
    cargos: RwLock<HashMap<TrackingId, Cargo>>,
}

impl InMemoryCargoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CargoRepository for InMemoryCargoRepository {
    async fn store(&self, cargo: Cargo) -> Result<()> {
        self.cargos
            .write()
            .await
            .insert(cargo.tracking_id.clone(), cargo);
        Ok(())
    }

    async fn find(&self, tracking_id: &TrackingId) -> Result<Option<Cargo>> {
        Ok(self.cargos.read().await.get(tracking_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Cargo>> {
        Ok(self.cargos.read().await.values().cloned().collect())
    }
}

pub struct InMemoryLocationRepository {
    locations: RwLock<HashMap<UnLocode, Location>>,
}

impl InMemoryLocationRepository {
    pub fn new(locations: Vec<Location>) -> Self {
        let locations = locations
            .into_iter()
            .map(|location| (location.un_locode.clone(), location))
            .collect();
        Self {
            locations: RwLock::new(locations),
        }
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find(&self, un_locode: &UnLocode) -> Result<Option<Location>> {
        Ok(self.locations.read().await.get(un_locode).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Location>> {
        Ok(self.locations.read().await.values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryHandlingEventRepository {
    events: RwLock<HashMap<TrackingId, Vec<HandlingEvent>>>,
}

impl InMemoryHandlingEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HandlingEventRepository for InMemoryHandlingEventRepository {
    async fn store(&self, event: HandlingEvent) -> Result<()> {
        self.events
            .write()
            .await
            .entry(event.tracking_id.clone())
            .or_default()
            .push(event);
        Ok(())
    }

    async fn query_handling_history(&self, tracking_id: &TrackingId) -> Result<HandlingHistory> {
        let events = self
            .events
            .read()
            .await
            .get(tracking_id)
            .cloned()
            .unwrap_or_default();
        Ok(HandlingHistory::new(events))
    }
}
