//! Job board session
//!
//! Wires the HTTP adapters into the feed controller and the workflow
//! services for one MCP session.

use std::sync::Arc;

use anyhow::{Context, Result};
use jobboard_client::adapters::{HttpJobApi, NominatimGeocoder, SessionInteractionLog};
use jobboard_client::app::{JobFeedController, LocationService, PostJobService};
use jobboard_client::Config;

pub type Feed = JobFeedController<HttpJobApi, SessionInteractionLog>;

/// Everything one visitor's session needs
pub struct JobBoardSession {
    pub feed: Feed,
    pub location: LocationService<NominatimGeocoder>,
    pub posting: PostJobService<HttpJobApi, HttpJobApi>,
}

impl JobBoardSession {
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env().context("Invalid job board configuration")?;
        Self::new(config)
    }

    pub fn new(config: Config) -> Result<Self> {
        let api = Arc::new(
            HttpJobApi::with_config(&config).context("Failed to build Job API client")?,
        );
        let geocoder =
            Arc::new(NominatimGeocoder::new(&config).context("Failed to build geocoder client")?);

        tracing::info!(
            api_url = %config.api_url,
            page_size = config.page_size,
            "Job board session configured"
        );

        Ok(Self {
            feed: JobFeedController::new(
                api.clone(),
                Arc::new(SessionInteractionLog::new()),
                config.page_size,
            ),
            location: LocationService::new(geocoder, config.default_radius),
            posting: PostJobService::new(api.clone(), api, config.posting_fee_cents),
        })
    }
}
