//! Domain layer
//!
//! Contains the job board's data model with no I/O.
//! - `entities`: Postings, filters, the posting form, interactions
//! - `ports`: Trait definitions for the remote collaborators

pub mod entities;
pub mod ports;
