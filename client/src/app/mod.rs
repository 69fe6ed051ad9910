//! Application layer
//!
//! Use cases over the domain ports: the job feed, location lookup and the
//! paid posting workflow.

pub mod feed_controller;
pub mod feed_state;
pub mod location_service;
pub mod post_job_service;

pub use feed_controller::{
    ApplicationTarget, FeedSnapshot, JobFeedController, LoadOutcome, LocationOutcome,
};
pub use feed_state::{reduce, Action, FeedState, FeedStatus, PageBlocked, PageRequest};
pub use location_service::LocationService;
pub use post_job_service::{format_cents, PostJobService, PostingOffer, PostingReceipt, LISTING_DAYS};
