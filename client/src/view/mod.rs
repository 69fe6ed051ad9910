//! Text rendering
//!
//! Renders the feed, job cards, job details and the posting workflow pages
//! to markdown for the presentation layer.

pub mod renderer;

pub use renderer::*;
