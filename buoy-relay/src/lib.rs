//! buoy-relay: relays fresh NDBC buoy observations to APRS-IS as
//! weather object reports. Intended to run once per invocation,
//! driven by cron.

pub mod config;
pub mod logging;
pub mod module;
