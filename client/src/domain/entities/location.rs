//! Location filter types
//!
//! A location filter is a US ZIP code plus a search radius in miles.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Radius choices offered to the user, in miles
pub const RADIUS_OPTIONS: [u32; 5] = [25, 50, 100, 150, 200];

/// Radius used when none is chosen
pub const DEFAULT_RADIUS_MILES: f64 = 150.0;

/// A 5-digit US ZIP code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::PostalCode(raw.to_string()))
        }
    }

    /// Accepts ZIP+4 ("78701-1234") by keeping the 5-digit prefix.
    pub fn parse_lenient(raw: &str) -> Result<Self, ValidationError> {
        let prefix = raw.trim().split('-').next().unwrap_or_default();
        Self::parse(prefix).map_err(|_| ValidationError::PostalCode(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostalCode {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Search radius in miles (positive, finite)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Radius(f64);

impl Radius {
    pub fn miles(miles: f64) -> Result<Self, ValidationError> {
        if miles.is_finite() && miles > 0.0 {
            Ok(Self(miles))
        } else {
            Err(ValidationError::Radius(miles.to_string()))
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let miles = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::Radius(raw.to_string()))?;
        Self::miles(miles).map_err(|_| ValidationError::Radius(raw.to_string()))
    }

    pub fn as_miles(&self) -> f64 {
        self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_MILES)
    }
}

impl std::fmt::Display for Radius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ZIP code + radius
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationFilter {
    pub postal_code: PostalCode,
    pub radius: Radius,
}

impl LocationFilter {
    pub fn new(postal_code: PostalCode, radius: Radius) -> Self {
        Self {
            postal_code,
            radius,
        }
    }
}

impl std::fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "within {} miles of {}", self.radius, self.postal_code)
    }
}

/// Device coordinates (WGS 84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::Coordinates(format!(
                "{}, {}",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}
