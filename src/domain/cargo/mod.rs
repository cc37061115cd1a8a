// ============================================================================
// Cargo Domain - Business Logic for the Cargo Aggregate
// ============================================================================
//
// This module contains ALL cargo-specific code:
// - Value objects (TrackingId, RouteSpecification)
// - Itinerary matching (Leg, Itinerary, expected activity sequence)
// - Handling (HandlingActivity, HandlingEvent, HandlingHistory)
// - Delivery derivation (the projection engine)
// - Errors (CargoError enum)
// - Aggregate (Cargo with its mutation entry points)
//
// Everything here is pure computation over supplied inputs; repositories
// and services live elsewhere.
//
// ============================================================================

pub mod aggregate;
pub mod delivery;
pub mod errors;
pub mod handling;
pub mod itinerary;
pub mod value_objects;

// Re-export for convenience
pub use aggregate::*;
pub use delivery::*;
pub use errors::*;
pub use handling::*;
pub use itinerary::*;
pub use value_objects::*;
