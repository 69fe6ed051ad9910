//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The geocoder is mocked with mockall instead; its trait has no borrowed
//! parameters.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
