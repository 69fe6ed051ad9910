//! Mock implementations of port traits
//!
//! In-memory stand-ins for the Job API and the payment endpoint. They record
//! every call so tests can assert on what went over the wire.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{JobId, JobPosting, LocationFilter, NewJobPosting};
use crate::domain::ports::{JobApi, JobPage, PaymentGateway, PaymentIntent, PaymentIntentRequest};
use crate::error::ApiError;

fn unavailable() -> ApiError {
    ApiError::Api {
        status: 503,
        message: "Service unavailable".to_string(),
    }
}

// ============================================================================
// In-Memory Job API
// ============================================================================

#[derive(Default)]
pub struct MockJobApi {
    jobs: Arc<RwLock<Vec<JobPosting>>>,
    location_results: Arc<RwLock<Vec<JobPosting>>>,
    created: Arc<RwLock<Vec<NewJobPosting>>>,
    page_requests: Arc<RwLock<Vec<(usize, usize)>>>,
    location_requests: Arc<RwLock<Vec<LocationFilter>>>,
    calls: Arc<RwLock<usize>>,
    failing: Arc<RwLock<bool>>,
    reject_create: Arc<RwLock<Option<String>>>,
    delay: Option<Duration>,
}

impl MockJobApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Postings served by `list_jobs`, in server order
    pub fn with_jobs(self, jobs: Vec<JobPosting>) -> Self {
        *self.jobs.write().unwrap() = jobs;
        self
    }

    pub fn with_location_results(self, jobs: Vec<JobPosting>) -> Self {
        *self.location_results.write().unwrap() = jobs;
        self
    }

    /// Sleep before answering list and search calls
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every call fail as if the server were down
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write().unwrap() = failing;
    }

    /// Make `create_job` fail with this server message
    pub fn reject_create(&self, message: &str) {
        *self.reject_create.write().unwrap() = Some(message.to_string());
    }

    /// `(skip, limit)` of every `list_jobs` call
    pub fn page_requests(&self) -> Vec<(usize, usize)> {
        self.page_requests.read().unwrap().clone()
    }

    pub fn location_requests(&self) -> Vec<LocationFilter> {
        self.location_requests.read().unwrap().clone()
    }

    pub fn created_jobs(&self) -> Vec<NewJobPosting> {
        self.created.read().unwrap().clone()
    }

    /// Total calls across every endpoint
    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }

    fn begin_call(&self) -> Result<(), ApiError> {
        *self.calls.write().unwrap() += 1;
        if *self.failing.read().unwrap() {
            Err(unavailable())
        } else {
            Ok(())
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl JobApi for MockJobApi {
    async fn list_jobs(&self, skip: usize, limit: usize) -> Result<JobPage, ApiError> {
        self.page_requests.write().unwrap().push((skip, limit));
        self.begin_call()?;
        self.pause().await;
        let jobs = self.jobs.read().unwrap();
        let items = jobs.iter().skip(skip).take(limit).cloned().collect();
        Ok(JobPage { items })
    }

    async fn search_by_location(
        &self,
        filter: &LocationFilter,
    ) -> Result<Vec<JobPosting>, ApiError> {
        self.location_requests.write().unwrap().push(filter.clone());
        self.begin_call()?;
        self.pause().await;
        Ok(self.location_results.read().unwrap().clone())
    }

    async fn get_job(&self, id: JobId) -> Result<JobPosting, ApiError> {
        self.begin_call()?;
        let jobs = self.jobs.read().unwrap();
        jobs.iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }

    async fn create_job(&self, posting: &NewJobPosting) -> Result<JobPosting, ApiError> {
        self.begin_call()?;
        if let Some(message) = self.reject_create.read().unwrap().clone() {
            return Err(ApiError::Api {
                status: 422,
                message,
            });
        }

        let mut created = self.created.write().unwrap();
        created.push(posting.clone());
        let id = JobId(1000 + created.len() as i64);
        Ok(JobPosting {
            id,
            external_id: None,
            company_id: None,
            company_name: Some(posting.company_name.clone()),
            job_title: posting.job_title.clone(),
            description: posting.description.clone(),
            location: posting.location.clone(),
            postal_code: Some(posting.postal_code.clone()),
            employment_type: Some(posting.employment_type.clone()),
            remote_type: Some(posting.remote_type.clone()),
            salary_range: posting.salary_range.clone(),
            application_email: posting.application_email.clone(),
            application_link: posting.application_link.clone(),
            company_url: posting.company_url.clone(),
            job_function: Some(posting.job_function),
            posted_date: Some(chrono::Utc::now()),
            is_active: Some(true),
        })
    }
}

// ============================================================================
// In-Memory Payment Gateway
// ============================================================================

#[derive(Default)]
pub struct MockPaymentGateway {
    requests: Arc<RwLock<Vec<PaymentIntentRequest>>>,
    decline: Arc<RwLock<Option<String>>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decline every charge with this provider message
    pub fn declining(self, message: &str) -> Self {
        *self.decline.write().unwrap() = Some(message.to_string());
        self
    }

    pub fn requests(&self) -> Vec<PaymentIntentRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ApiError> {
        self.requests.write().unwrap().push(request.clone());
        if let Some(message) = self.decline.read().unwrap().clone() {
            return Err(ApiError::Api {
                status: 402,
                message,
            });
        }
        Ok(PaymentIntent {
            client_secret: format!("pi_test_secret_{}", request.payment_method_id),
            status: Some("succeeded".to_string()),
        })
    }
}
