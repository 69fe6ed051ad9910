//! Feed state and reducer
//!
//! Every change to the job feed goes through [`reduce`], a pure function of
//! the previous state and an [`Action`]. Requests are tagged with the
//! generation they were issued at; actions that reset the feed bump the
//! generation so responses to older requests are dropped.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::entities::{JobFunction, JobPosting, LocationFilter};

/// What the presentation layer should show besides the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
    Error(String),
}

/// A page fetch the state allows right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
    pub generation: u64,
}

/// Why no page fetch may be issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBlocked {
    /// A request is already in flight
    AlreadyLoading,
    /// The last page was short
    Exhausted,
    /// A location search is active; that query path is not paginated
    LocationMode,
}

#[derive(Debug, Clone)]
pub enum Action {
    PageRequested,
    PageLoaded {
        generation: u64,
        items: Vec<JobPosting>,
    },
    PageFailed {
        generation: u64,
        message: String,
    },
    FunctionFilterChanged(Option<JobFunction>),
    LocationSearchStarted(LocationFilter),
    LocationResults {
        generation: u64,
        items: Vec<JobPosting>,
    },
    LocationFailed {
        generation: u64,
        message: String,
    },
    LocationCleared,
    ErrorDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    /// Every posting fetched through pagination, in fetch order
    pub jobs: Vec<JobPosting>,
    pub page_size: usize,
    pub pages_loaded: usize,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub function_filter: Option<JobFunction>,
    pub location_filter: Option<LocationFilter>,
    /// Response of the last location search; replaces `jobs` as the source
    /// of the visible set while present
    pub location_results: Option<Vec<JobPosting>>,
    pub generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        Self {
            jobs: Vec::new(),
            page_size: page_size.max(1),
            pages_loaded: 0,
            has_more: true,
            loading: false,
            error: None,
            function_filter: None,
            location_filter: None,
            location_results: None,
            generation: 0,
        }
    }

    /// The next page to fetch, or why none may be fetched.
    pub fn next_page_request(&self) -> Result<PageRequest, PageBlocked> {
        if self.loading {
            return Err(PageBlocked::AlreadyLoading);
        }
        if self.location_filter.is_some() {
            return Err(PageBlocked::LocationMode);
        }
        if !self.has_more {
            return Err(PageBlocked::Exhausted);
        }
        Ok(PageRequest {
            skip: self.pages_loaded * self.page_size,
            limit: self.page_size,
            generation: self.generation,
        })
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn status(&self) -> FeedStatus {
        if self.loading {
            FeedStatus::Loading
        } else if let Some(message) = &self.error {
            FeedStatus::Error(message.clone())
        } else {
            FeedStatus::Idle
        }
    }

    /// Postings to show: the active source filtered by job function.
    pub fn visible(&self) -> Vec<&JobPosting> {
        let source = self.location_results.as_deref().unwrap_or(&self.jobs);
        source
            .iter()
            .filter(|job| job.matches_function(self.function_filter))
            .collect()
    }
}

/// Apply `action` to `state`.
pub fn reduce(mut state: FeedState, action: Action) -> FeedState {
    match action {
        Action::PageRequested => {
            state.loading = true;
            state.error = None;
        }
        Action::PageLoaded { generation, items } => {
            if !state.is_current(generation) {
                return state;
            }
            state.has_more = items.len() == state.page_size;
            state.pages_loaded += 1;
            state.jobs.extend(items);
            state.loading = false;
            state.error = None;
        }
        Action::PageFailed {
            generation,
            message,
        } => {
            if !state.is_current(generation) {
                return state;
            }
            state.loading = false;
            state.error = Some(message);
        }
        Action::FunctionFilterChanged(filter) => {
            state.function_filter = filter;
        }
        Action::LocationSearchStarted(filter) => {
            state.generation += 1;
            state.location_filter = Some(filter);
            state.loading = true;
            state.error = None;
        }
        Action::LocationResults { generation, items } => {
            if !state.is_current(generation) {
                return state;
            }
            state.location_results = Some(items);
            state.loading = false;
            state.error = None;
        }
        Action::LocationFailed {
            generation,
            message,
        } => {
            if !state.is_current(generation) {
                return state;
            }
            state.location_results = Some(Vec::new());
            state.loading = false;
            state.error = Some(message);
        }
        Action::LocationCleared => {
            if state.location_filter.is_none() {
                return state;
            }
            state.generation += 1;
            state.location_filter = None;
            state.location_results = None;
            state.loading = false;
            state.error = None;
        }
        Action::ErrorDismissed => {
            state.error = None;
        }
    }
    state
}
