use std::env;
use std::time::Duration;

use crate::domain::entities::{Radius, DEFAULT_RADIUS_MILES};
use crate::error::ConfigError;

/// Number of postings fetched per page
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Posting fee in cents ($35)
pub const DEFAULT_POSTING_FEE_CENTS: u64 = 3500;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Job API, including the version prefix
    pub api_url: String,
    /// Nominatim-compatible reverse geocoding service
    pub geocoder_url: String,
    /// Sent to the geocoder, which requires an identifying agent
    pub user_agent: String,
    pub page_size: usize,
    pub posting_fee_cents: u64,
    pub default_radius: Radius,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/v1".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "RoofingJobBoard/1.0".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            posting_fee_cents: DEFAULT_POSTING_FEE_CENTS,
            default_radius: Radius::default(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_size = parse_var(&lookup, "JOBBOARD_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                var: "JOBBOARD_PAGE_SIZE",
                value: "0".to_string(),
            });
        }

        let radius_miles = parse_var(&lookup, "JOBBOARD_DEFAULT_RADIUS", DEFAULT_RADIUS_MILES)?;
        let default_radius = Radius::miles(radius_miles).map_err(|_| ConfigError::Invalid {
            var: "JOBBOARD_DEFAULT_RADIUS",
            value: radius_miles.to_string(),
        })?;

        let timeout_secs = parse_var(
            &lookup,
            "JOBBOARD_HTTP_TIMEOUT_SECS",
            defaults.http_timeout.as_secs(),
        )?;

        Ok(Self {
            api_url: lookup("JOBBOARD_API_URL").unwrap_or(defaults.api_url),
            geocoder_url: lookup("JOBBOARD_GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            user_agent: lookup("JOBBOARD_USER_AGENT").unwrap_or(defaults.user_agent),
            page_size,
            posting_fee_cents: parse_var(
                &lookup,
                "JOBBOARD_POSTING_FEE_CENTS",
                defaults.posting_fee_cents,
            )?,
            default_radius,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
