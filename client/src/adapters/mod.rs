//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod nominatim;
pub mod session_log;

pub use http::HttpJobApi;
pub use nominatim::NominatimGeocoder;
pub use session_log::SessionInteractionLog;
