//! Job API adapter
//!
//! HTTP implementation of the Job API and payment ports.

pub mod client;

pub use client::HttpJobApi;
