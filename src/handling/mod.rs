// ============================================================================
// Handling - Registration of Physical Handling Events
// ============================================================================
//
// Receives reports from ports and carriers, validates them, stores the
// immutable event, and re-derives the affected cargo's delivery projection.
//
// ============================================================================

pub mod errors;
pub mod service;

pub use errors::HandlingError;
pub use service::HandlingEventService;
