//! Domain entities
//!
//! Pure domain models for the job board: postings, filters, the posting form
//! and tracked interactions.

pub mod interaction;
pub mod job;
pub mod location;
pub mod posting;

pub use interaction::{InteractionAction, JobInteraction, SessionId};
pub use job::{
    parse_function_filter, title_case, ApplicationMethod, EmploymentType, JobFunction, JobId,
    JobPosting, RemoteType,
};
pub use location::{
    Coordinates, LocationFilter, PostalCode, Radius, DEFAULT_RADIUS_MILES, RADIUS_OPTIONS,
};
pub use posting::NewJobPosting;
