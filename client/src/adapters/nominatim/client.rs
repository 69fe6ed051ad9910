//! Nominatim reverse geocoding client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::entities::{Coordinates, PostalCode};
use crate::domain::ports::Geocoder;
use crate::error::GeocodeError;

/// Reverse geocoder backed by a Nominatim-compatible service
#[derive(Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &Config) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        // Nominatim's usage policy rejects anonymous clients.
        let agent = HeaderValue::from_str(&config.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("RoofingJobBoard/1.0"));
        headers.insert(USER_AGENT, agent);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.geocoder_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Deserialize)]
struct Address {
    #[serde(default)]
    postcode: Option<String>,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<PostalCode>, GeocodeError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&addressdetails=1",
            self.base_url, coordinates.latitude, coordinates.longitude
        );
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Deserialization(e.to_string()))?;

        let postcode = body.address.and_then(|address| address.postcode);
        match postcode {
            Some(raw) => match PostalCode::parse_lenient(&raw) {
                Ok(code) => Ok(Some(code)),
                Err(e) => {
                    tracing::debug!("Ignoring postcode {:?}: {}", raw, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
