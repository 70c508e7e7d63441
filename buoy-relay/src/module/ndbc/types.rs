//! NDBC observation data types

use chrono::{DateTime, Utc};

/// One normalized buoy observation, built from a single feed row.
///
/// Weather fields are `None` where the feed reported its `MM`
/// missing-data marker; the APRS sentinel strings (`...` and `.....`)
/// are a packet-encoding concern, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct StationObservation {
    /// Station identifier, e.g. "46042"
    pub station_id: String,
    /// Decimal degrees, north positive
    pub latitude: f64,
    /// Decimal degrees, east positive
    pub longitude: f64,
    /// Observation time (UTC, minute precision)
    pub observed_at: DateTime<Utc>,
    /// Wind direction in degrees true
    pub wind_dir_deg: Option<u16>,
    /// Wind speed, converted to whole mph
    pub wind_speed_mph: Option<u32>,
    /// Wind gust, converted to whole mph
    pub wind_gust_mph: Option<u32>,
    /// Air temperature, converted to whole degrees Fahrenheit
    pub temperature_f: Option<i32>,
    /// Sea-level pressure in tenths of hPa
    pub pressure_tenths_hpa: Option<u32>,
}

impl StationObservation {
    /// True when every weather field is missing. A position-only report
    /// carries nothing worth relaying.
    pub fn has_no_weather_data(&self) -> bool {
        self.wind_dir_deg.is_none()
            && self.wind_speed_mph.is_none()
            && self.wind_gust_mph.is_none()
            && self.temperature_f.is_none()
            && self.pressure_tenths_hpa.is_none()
    }
}
