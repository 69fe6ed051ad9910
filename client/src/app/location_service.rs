//! Location service
//!
//! Turns device coordinates or typed input into a location filter.

use std::sync::Arc;

use crate::domain::entities::{Coordinates, LocationFilter, PostalCode, Radius};
use crate::domain::ports::Geocoder;
use crate::error::ValidationError;

pub struct LocationService<G>
where
    G: Geocoder,
{
    geocoder: Arc<G>,
    default_radius: Radius,
}

impl<G> LocationService<G>
where
    G: Geocoder,
{
    pub fn new(geocoder: Arc<G>, default_radius: Radius) -> Self {
        Self {
            geocoder,
            default_radius,
        }
    }

    /// Default location filter for the device's position.
    ///
    /// Lookup failures are logged and yield `None`; the user can still type
    /// a ZIP code.
    pub async fn detect(&self, coordinates: Coordinates) -> Option<LocationFilter> {
        match self.geocoder.reverse(coordinates).await {
            Ok(Some(postal_code)) => {
                tracing::info!("Detected ZIP {} for current position", postal_code);
                Some(LocationFilter::new(postal_code, self.default_radius))
            }
            Ok(None) => {
                tracing::debug!(
                    lat = coordinates.latitude,
                    lon = coordinates.longitude,
                    "No ZIP code for current position"
                );
                None
            }
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                None
            }
        }
    }

    /// Filter from form input; a blank ZIP means no location constraint and
    /// a blank radius means the configured default.
    pub fn from_input(
        &self,
        zip: &str,
        radius: &str,
    ) -> Result<Option<LocationFilter>, ValidationError> {
        if zip.trim().is_empty() {
            return Ok(None);
        }
        let postal_code = PostalCode::parse(zip)?;
        let radius = if radius.trim().is_empty() {
            self.default_radius
        } else {
            Radius::parse(radius)?
        };
        Ok(Some(LocationFilter::new(postal_code, radius)))
    }
}
