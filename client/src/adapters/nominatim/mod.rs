//! Nominatim adapter
//!
//! Reverse geocoding against OpenStreetMap's Nominatim.

pub mod client;

pub use client::NominatimGeocoder;
