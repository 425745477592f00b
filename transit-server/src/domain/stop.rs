//! Stop identifiers and reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code: {reason}")]
pub struct InvalidStopCode {
    reason: &'static str,
}

/// Internal identifier of a stop.
///
/// Opaque and non-empty; assigned by the out-of-scope import process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Create a stop id from a raw string.
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(value: &str) -> Self {
        StopId(value.to_string())
    }
}

/// A public stop code, as printed on tickets and signage.
///
/// Codes are 2 to 8 uppercase ASCII letters or digits. This type
/// guarantees that any `StopCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StopCode;
///
/// let code = StopCode::parse("NDLS").unwrap();
/// assert_eq!(code.as_str(), "NDLS");
///
/// // Lowercase is rejected
/// assert!(StopCode::parse("ndls").is_err());
///
/// // Wrong length is rejected
/// assert!(StopCode::parse("N").is_err());
/// assert!(StopCode::parse("NDLSNDLSX").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StopCode(String);

impl StopCode {
    /// Parse a public stop code from a string.
    ///
    /// The input must be 2 to 8 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        let bytes = s.as_bytes();

        if bytes.len() < 2 || bytes.len() > 8 {
            return Err(InvalidStopCode {
                reason: "must be 2 to 8 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStopCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(StopCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fixed location where trips pick up or drop off passengers.
///
/// Immutable reference data, created by an out-of-scope import process.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Internal id
    pub id: StopId,
    /// Human-readable name
    pub name: String,
    /// Public code
    pub code: StopCode,
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Locality (town/city) name
    pub locality: Option<String>,
    /// IANA timezone name
    pub timezone: Option<String>,
    /// Opaque attachment; never inspected by search logic
    pub metadata: Option<serde_json::Value>,
}

impl Stop {
    /// Returns the stop's coordinates as (longitude, latitude).
    pub fn position(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StopCode::parse("NDLS").is_ok());
        assert!(StopCode::parse("BCT").is_ok());
        assert!(StopCode::parse("ST01").is_ok());
        assert!(StopCode::parse("AB").is_ok());
        assert!(StopCode::parse("ABCDEFGH").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(StopCode::parse("ndls").is_err());
        assert!(StopCode::parse("Ndls").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StopCode::parse("").is_err());
        assert!(StopCode::parse("A").is_err());
        assert!(StopCode::parse("ABCDEFGHI").is_err());
    }

    #[test]
    fn reject_punctuation() {
        assert!(StopCode::parse("A-B").is_err());
        assert!(StopCode::parse("A B").is_err());
        assert!(StopCode::parse("AÖB").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let code = StopCode::parse("NDLS").unwrap();
        assert_eq!(code.as_str(), "NDLS");
    }

    #[test]
    fn display_and_debug() {
        let code = StopCode::parse("BCT").unwrap();
        assert_eq!(format!("{}", code), "BCT");
        assert_eq!(format!("{:?}", code), "StopCode(BCT)");
    }

    #[test]
    fn stop_id_equality() {
        assert_eq!(StopId::from("s1"), StopId::new("s1"));
        assert_ne!(StopId::from("s1"), StopId::from("s2"));
    }
}
