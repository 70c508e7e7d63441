//! APRS-IS relay module
//!
//! Encodes a [`StationObservation`] into an APRS weather object report
//! and sends it to an APRS-IS server over the line-oriented TCP
//! protocol.
//!
//! [`StationObservation`]: crate::module::ndbc::StationObservation

pub mod client;
pub mod packet;
pub mod position;

pub use client::AprsClient;
