//! NDBC (National Data Buoy Center) latest-observations feed module
//!
//! Fetches the latest_obs.txt table and normalizes each row into a
//! [`StationObservation`] ready for APRS encoding.

pub mod fetcher;
pub mod parser;
pub mod types;

pub use fetcher::FeedFetcher;
pub use types::StationObservation;
