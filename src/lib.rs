// ============================================================================
// Cargo Tracker - Core State-Derivation Engine
// ============================================================================
//
// Tracks shipping cargo from booking to claim. The heart of the crate is the
// delivery derivation: route specification + assigned itinerary + handling
// history in, live delivery projection out. Everything around it (booking,
// handling registration, views) is thin orchestration over that pure core.
//
// ============================================================================

pub mod booking;
pub mod domain;
pub mod handling;
pub mod routing;
pub mod store;
pub mod utils;
