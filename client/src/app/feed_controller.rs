//! Job feed controller
//!
//! Owns the session's job feed: drives incremental page loads, applies the
//! function and location filters, and serves the detail view.
//!
//! The state lock is never held across a network call. A page fetch marks
//! the state as loading before the request goes out, which is what keeps a
//! second fetch from being issued while one is in flight.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::feed_state::{reduce, Action, FeedState, FeedStatus, PageBlocked};
use crate::domain::entities::{
    ApplicationMethod, JobFunction, JobId, JobInteraction, JobPosting, LocationFilter, SessionId,
};
use crate::domain::ports::{InteractionSink, JobApi};
use crate::error::FeedError;

/// Result of a `load_next_page` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived with this many postings
    Loaded(usize),
    AlreadyLoading,
    Exhausted,
    LocationMode,
    /// The response arrived after the feed was reset and was discarded
    Stale,
}

impl From<PageBlocked> for LoadOutcome {
    fn from(blocked: PageBlocked) -> Self {
        match blocked {
            PageBlocked::AlreadyLoading => LoadOutcome::AlreadyLoading,
            PageBlocked::Exhausted => LoadOutcome::Exhausted,
            PageBlocked::LocationMode => LoadOutcome::LocationMode,
        }
    }
}

/// Result of `apply_location_filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOutcome {
    /// Search results now form the visible set
    Found(usize),
    /// The filter was removed; the accumulated feed is visible again
    Cleared,
    Stale,
}

/// Point-in-time view of the feed for rendering
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub jobs: Vec<JobPosting>,
    #[serde(skip)]
    pub status: FeedStatus,
    pub has_more: bool,
    pub total_loaded: usize,
    pub function_filter: Option<JobFunction>,
    pub location_filter: Option<LocationFilter>,
}

/// Where an application click leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationTarget {
    pub method: ApplicationMethod,
    pub url: String,
}

pub struct JobFeedController<A, S>
where
    A: JobApi,
    S: InteractionSink,
{
    api: Arc<A>,
    interactions: Arc<S>,
    session: SessionId,
    state: Mutex<FeedState>,
}

impl<A, S> JobFeedController<A, S>
where
    A: JobApi,
    S: InteractionSink,
{
    pub fn new(api: Arc<A>, interactions: Arc<S>, page_size: usize) -> Self {
        Self {
            api,
            interactions,
            session: SessionId::new(),
            state: Mutex::new(FeedState::new(page_size)),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    async fn dispatch(&self, action: Action) {
        let mut state = self.state.lock().await;
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
    }

    /// Fetch the next page and append it to the feed.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, FeedError> {
        let request = {
            let mut state = self.state.lock().await;
            match state.next_page_request() {
                Ok(request) => {
                    let current = std::mem::take(&mut *state);
                    *state = reduce(current, Action::PageRequested);
                    request
                }
                Err(blocked) => {
                    tracing::debug!("Not loading next page: {:?}", blocked);
                    return Ok(blocked.into());
                }
            }
        };

        tracing::info!(skip = request.skip, limit = request.limit, "Loading jobs page");
        let result = self.api.list_jobs(request.skip, request.limit).await;

        let mut state = self.state.lock().await;
        if !state.is_current(request.generation) {
            tracing::debug!(skip = request.skip, "Discarding stale page response");
            return Ok(LoadOutcome::Stale);
        }

        let current = std::mem::take(&mut *state);
        match result {
            Ok(page) => {
                let count = page.items.len();
                *state = reduce(
                    current,
                    Action::PageLoaded {
                        generation: request.generation,
                        items: page.items,
                    },
                );
                tracing::info!(
                    count,
                    total = state.jobs.len(),
                    has_more = state.has_more,
                    "Loaded jobs page"
                );
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                tracing::warn!("Failed to load jobs page at offset {}: {}", request.skip, e);
                let err = FeedError::from(e);
                *state = reduce(
                    current,
                    Action::PageFailed {
                        generation: request.generation,
                        message: err.user_message(),
                    },
                );
                Err(err)
            }
        }
    }

    /// Clear a previous failure and try the next page again.
    pub async fn retry(&self) -> Result<LoadOutcome, FeedError> {
        self.dispatch(Action::ErrorDismissed).await;
        self.load_next_page().await
    }

    /// Restrict the visible set to one job function (`None` shows all).
    /// Never touches the network.
    pub async fn apply_function_filter(&self, filter: Option<JobFunction>) -> Vec<JobPosting> {
        self.dispatch(Action::FunctionFilterChanged(filter)).await;
        self.visible().await
    }

    /// Search by ZIP and radius, or drop the location constraint with `None`.
    pub async fn apply_location_filter(
        &self,
        filter: Option<LocationFilter>,
    ) -> Result<LocationOutcome, FeedError> {
        let filter = match filter {
            Some(filter) => filter,
            None => {
                self.dispatch(Action::LocationCleared).await;
                tracing::info!("Location filter cleared");
                return Ok(LocationOutcome::Cleared);
            }
        };

        let generation = {
            let mut state = self.state.lock().await;
            let current = std::mem::take(&mut *state);
            *state = reduce(current, Action::LocationSearchStarted(filter.clone()));
            state.generation
        };

        tracing::info!("Searching jobs {}", filter);
        let result = self.api.search_by_location(&filter).await;

        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            tracing::debug!("Discarding stale location results for {}", filter);
            return Ok(LocationOutcome::Stale);
        }

        let current = std::mem::take(&mut *state);
        match result {
            Ok(items) => {
                let count = items.len();
                *state = reduce(current, Action::LocationResults { generation, items });
                tracing::info!(count, "Found jobs {}", filter);
                Ok(LocationOutcome::Found(count))
            }
            Err(e) => {
                tracing::warn!("Location search {} failed: {}", filter, e);
                let err = FeedError::from(e);
                *state = reduce(
                    current,
                    Action::LocationFailed {
                        generation,
                        message: err.user_message(),
                    },
                );
                Err(err)
            }
        }
    }

    pub async fn visible(&self) -> Vec<JobPosting> {
        let state = self.state.lock().await;
        state.visible().into_iter().cloned().collect()
    }

    pub async fn status(&self) -> FeedStatus {
        self.state.lock().await.status()
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().await;
        FeedSnapshot {
            jobs: state.visible().into_iter().cloned().collect(),
            status: state.status(),
            has_more: state.has_more && state.location_filter.is_none(),
            total_loaded: state.jobs.len(),
            function_filter: state.function_filter,
            location_filter: state.location_filter.clone(),
        }
    }

    /// Posting for the detail view; records a `view_details` interaction.
    pub async fn select_job(&self, id: JobId) -> Result<JobPosting, FeedError> {
        let job = self.find_job(id).await?;
        self.interactions
            .record(JobInteraction::view(self.session, &job))
            .await;
        Ok(job)
    }

    /// Resolve where applying through `method` leads; records an
    /// `apply_click` interaction.
    pub async fn apply_to_job(
        &self,
        id: JobId,
        method: ApplicationMethod,
    ) -> Result<ApplicationTarget, FeedError> {
        let job = self.find_job(id).await?;
        let url = job
            .application_target(method)
            .ok_or_else(|| FeedError::NoApplicationMethod {
                job_id: id,
                method: method.to_string(),
            })?;
        self.interactions
            .record(JobInteraction::apply(self.session, &job, method))
            .await;
        Ok(ApplicationTarget { method, url })
    }

    /// Look in the visible set, then everything fetched, then ask the API.
    async fn find_job(&self, id: JobId) -> Result<JobPosting, FeedError> {
        {
            let state = self.state.lock().await;
            let cached = state
                .visible()
                .into_iter()
                .find(|job| job.id == id)
                .or_else(|| state.jobs.iter().find(|job| job.id == id))
                .or_else(|| {
                    state
                        .location_results
                        .as_deref()
                        .and_then(|results| results.iter().find(|job| job.id == id))
                });
            if let Some(job) = cached {
                return Ok(job.clone());
            }
        }

        tracing::debug!("Job {} not in feed, fetching", id);
        Ok(self.api.get_job(id).await?)
    }
}
