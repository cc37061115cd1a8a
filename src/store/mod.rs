// ============================================================================
// Store Layer - Repository Collaborator Contracts
// ============================================================================
//
// Capability traits for everything the services load and persist. Durable
// persistence is an external concern; the in-memory implementations here
// back the demo binary and the tests. All failures travel as values, never
// process aborts.
//
// ============================================================================

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::cargo::{Cargo, HandlingEvent, HandlingHistory, TrackingId};
use crate::domain::location::{Location, UnLocode};

mod in_memory;

pub use in_memory::{
    InMemoryCargoRepository, InMemoryHandlingEventRepository, InMemoryLocationRepository,
};

/// Aggregate store for cargos. Find returns None for unknown ids; errors
/// are reserved for collaborator failures.
#[async_trait]
pub trait CargoRepository: Send + Sync {
    async fn store(&self, cargo: Cargo) -> Result<()>;
    async fn find(&self, tracking_id: &TrackingId) -> Result<Option<Cargo>>;
    async fn find_all(&self) -> Result<Vec<Cargo>>;
}

/// The location directory.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find(&self, un_locode: &UnLocode) -> Result<Option<Location>>;
    async fn find_all(&self) -> Result<Vec<Location>>;
}

/// Append-only store of handling events, read back as an ordered history
/// per tracking id.
#[async_trait]
pub trait HandlingEventRepository: Send + Sync {
    async fn store(&self, event: HandlingEvent) -> Result<()>;
    async fn query_handling_history(&self, tracking_id: &TrackingId) -> Result<HandlingHistory>;
}
