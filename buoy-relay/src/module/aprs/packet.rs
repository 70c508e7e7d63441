//! APRS weather object report composition
//!
//! Builds the complete data line sent to APRS-IS, e.g.:
//!
//! `N1TEST>APFBUO,TCPIP*:;46042    *301245z3647.10N/12228.14W_150/022g026t059b10132`
//!
//! Every weather field has a fixed width; missing values are rendered
//! with the APRS sentinel of the matching width (`...` for 3-character
//! fields, `.....` for the 5-character pressure field).

use super::position;
use crate::module::ndbc::StationObservation;

/// Destination address identifying this client's packets.
const DEST: &str = "APFBUO";

/// Sentinel for a missing 3-character weather field.
const UNKNOWN3: &str = "...";

/// Sentinel for the missing 5-character pressure field.
const UNKNOWN5: &str = ".....";

fn fmt_wind_dir(value: Option<u16>) -> String {
    value.map_or_else(|| UNKNOWN3.to_string(), |d| format!("{d:03}"))
}

fn fmt_speed(value: Option<u32>) -> String {
    value.map_or_else(|| UNKNOWN3.to_string(), |s| format!("{s:03}"))
}

/// Whole °F: non-negative zero-padded to 3 digits, negative as a minus
/// sign plus 2 zero-padded digits (e.g. `-07`).
fn fmt_temperature(value: Option<i32>) -> String {
    match value {
        None => UNKNOWN3.to_string(),
        Some(t) if t >= 0 => format!("{t:03}"),
        Some(t) => format!("-{:02}", t.abs()),
    }
}

fn fmt_pressure(value: Option<u32>) -> String {
    value.map_or_else(|| UNKNOWN5.to_string(), |p| format!("{p:05}"))
}

/// Compose the full object report for one observation.
pub fn object_report(callsign: &str, observation: &StationObservation) -> String {
    format!(
        "{}>{},TCPIP*:;{:<9}*{}z{}/{}_{}/{}g{}t{}b{}",
        callsign,
        DEST,
        observation.station_id,
        observation.observed_at.format("%d%H%M"),
        position::encode_latitude(observation.latitude),
        position::encode_longitude(observation.longitude),
        fmt_wind_dir(observation.wind_dir_deg),
        fmt_speed(observation.wind_speed_mph),
        fmt_speed(observation.wind_gust_mph),
        fmt_temperature(observation.temperature_f),
        fmt_pressure(observation.pressure_tenths_hpa),
    )
}
