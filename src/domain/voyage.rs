use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Voyage Value Objects
// ============================================================================
//
// Only voyage identity matters to the tracking core; schedules and carrier
// movements belong to the routing collaborator.
//
// ============================================================================

/// Identifies a voyage, e.g. "V0100".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoyageNumber(String);

impl VoyageNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoyageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VoyageNumber {
    fn from(number: &str) -> Self {
        Self(number.to_string())
    }
}

impl From<String> for VoyageNumber {
    fn from(number: String) -> Self {
        Self(number)
    }
}
