// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains domain-specific aggregates and value objects:
// - Locations (UN/LOCODE directory entries)
// - Voyages (identity only; schedules are out of scope)
// - Cargo (the aggregate root, with itinerary matching and delivery
//   derivation)
//
// This layer is completely separate from the repositories and services
// that orchestrate it.
//
// ============================================================================

pub mod cargo;
pub mod location;
pub mod voyage;
