//! Unified error types for the job board client
//!
//! This module defines error types for each collaborator:
//! - `ApiError`: Job API client errors (transport, non-2xx, decoding)
//! - `GeocodeError`: Reverse geocoding errors
//! - `ValidationError`: Invalid user input (posting form, ZIP, radius)
//! - `PostJobError`: Failures of the paid posting workflow
//! - `FeedError`: Failures surfaced by the feed controller
//! - `ConfigError`: Invalid environment configuration

use thiserror::Error;

use crate::domain::entities::JobId;

/// Message shown whenever the job server cannot be reached.
pub const SERVER_UNAVAILABLE: &str =
    "Unable to connect to job server. Please try again later. The server might be temporarily down.";

/// Job API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The provider's own message when the server sent one, otherwise the
    /// error's display text.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Reverse geocoding errors
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geocoder error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Invalid user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("ZIP code must be 5 digits: {0}")]
    PostalCode(String),

    #[error("Radius must be a positive number of miles: {0}")]
    Radius(String),

    #[error("Coordinates out of range: {0}")]
    Coordinates(String),

    #[error("Unknown job function: {0}")]
    JobFunction(String),

    #[error("Invalid email address: {0}")]
    Email(String),

    #[error("Invalid URL for {field}: {value}")]
    Url { field: &'static str, value: String },

    #[error("At least one way to apply (email, link or company URL) is required")]
    NoApplicationMethod,
}

/// Failures of the paid job-posting workflow
///
/// Each variant renders as a blocking alert carrying the provider's message.
#[derive(Debug, Error)]
pub enum PostJobError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Payment failed: {0}")]
    Payment(String),

    #[error("Failed to create job: {0}")]
    JobCreation(String),

    #[error("A job posting is already being submitted")]
    InProgress,
}

/// Failures surfaced by the feed controller
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Job {job_id} cannot be applied to via {method}")]
    NoApplicationMethod { job_id: JobId, method: String },
}

impl FeedError {
    /// Text for the presentation layer. Network failures are not
    /// distinguished from each other.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::Api(ApiError::NotFound(id)) | FeedError::NotFound(id) => {
                format!("Job {} is no longer available.", id)
            }
            FeedError::Api(_) => SERVER_UNAVAILABLE.to_string(),
            FeedError::NoApplicationMethod { .. } => self.to_string(),
        }
    }
}

/// Invalid environment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}
