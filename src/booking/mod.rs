// ============================================================================
// Booking - Orchestration of the Cargo Booking Lifecycle
// ============================================================================
//
// Thin by design: every operation loads aggregates, invokes the domain
// layer, and persists. The interesting logic lives in the delivery
// derivation and the view assembler.
//
// ============================================================================

pub mod errors;
pub mod service;
pub mod views;

pub use errors::BookingError;
pub use service::BookingService;
pub use views::{assemble, CargoView, EventView, LegView};
