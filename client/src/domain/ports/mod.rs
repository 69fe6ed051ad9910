//! Domain ports (traits)
//!
//! Port traits define the collaborators the client talks to.
//! Adapters provide concrete implementations of these traits.

pub mod analytics;
pub mod geocoder;
pub mod job_api;
pub mod payments;

pub use analytics::InteractionSink;
pub use geocoder::Geocoder;
pub use job_api::{JobApi, JobPage};
pub use payments::{PaymentGateway, PaymentIntent, PaymentIntentRequest};
