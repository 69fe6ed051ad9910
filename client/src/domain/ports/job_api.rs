//! Job API port trait
//!
//! Defines the interface for the remote job listing service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{JobId, JobPosting, LocationFilter, NewJobPosting};
use crate::error::ApiError;

/// One page of postings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    pub items: Vec<JobPosting>,
}

/// Port trait for the Job API
#[async_trait]
pub trait JobApi: Send + Sync {
    /// `GET /jobs?skip=&limit=`
    async fn list_jobs(&self, skip: usize, limit: usize) -> Result<JobPage, ApiError>;

    /// `GET /jobs/search/location?zip_code=&radius=`
    async fn search_by_location(&self, filter: &LocationFilter)
        -> Result<Vec<JobPosting>, ApiError>;

    /// `GET /jobs/{id}`
    async fn get_job(&self, id: JobId) -> Result<JobPosting, ApiError>;

    /// `POST /jobs`
    async fn create_job(&self, posting: &NewJobPosting) -> Result<JobPosting, ApiError>;
}
