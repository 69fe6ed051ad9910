//! Job board client
//!
//! Client layer over the job board's REST API: a paginated, filterable job
//! feed, location lookup, and the paid job-posting workflow.
//!
//! Layout follows a ports-and-adapters split:
//! - `domain`: entities and port traits
//! - `adapters`: HTTP implementations of the ports
//! - `app`: the feed controller and workflow services
//! - `view`: markdown rendering for the presentation layer

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod routes;
pub mod view;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::{ApiError, ConfigError, FeedError, GeocodeError, PostJobError, ValidationError};
