use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Location Value Objects
// ============================================================================

/// United Nations location code, e.g. "SESTO" for Stockholm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnLocode(String);

impl UnLocode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnLocode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnLocode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for UnLocode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// A known port or terminal in the location directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub un_locode: UnLocode,
    pub name: String,
}

impl Location {
    pub fn new(un_locode: impl Into<UnLocode>, name: impl Into<String>) -> Self {
        Self {
            un_locode: un_locode.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_un_locode_display_matches_code() {
        let code = UnLocode::from("SESTO");
        assert_eq!(code.to_string(), "SESTO");
        assert_eq!(code.as_str(), "SESTO");
    }

    #[test]
    fn test_location_construction() {
        let stockholm = Location::new("SESTO", "Stockholm");
        assert_eq!(stockholm.un_locode, UnLocode::from("SESTO"));
        assert_eq!(stockholm.name, "Stockholm");
    }

    #[test]
    fn test_un_locode_serialization() {
        let code = UnLocode::from("DEHAM");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"DEHAM\"");
        let back: UnLocode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }
}
