//! NDBC latest_obs.txt table parser
//!
//! Turns the whitespace-delimited latest-observations table into
//! [`StationObservation`] records, applying the freshness and
//! completeness filters and the feed-unit → APRS-unit conversions.

use chrono::{DateTime, Duration, TimeZone, Utc};
use thiserror::Error;
use tracing::{debug, info};

use super::types::StationObservation;

/// Missing-data marker used throughout the NDBC feed.
const MISSING: &str = "MM";

/// Meters per second → miles per hour.
const MPS_TO_MPH: f64 = 2.23694;

/// Observations older than this (relative to fetch time) are dropped.
const MAX_AGE_MINUTES: i64 = 30;

/// Rows shorter than this are truncated or otherwise malformed.
const MIN_LINE_LEN: usize = 70;

/// Leading header and units lines in the feed.
const HEADER_LINES: usize = 2;

/// Token offsets into one feed row.
///
/// The table is positional and independently versioned by NOAA; if the
/// column layout ever changes, this mapping is the only place to fix up.
mod col {
    pub const STATION_ID: usize = 0;
    pub const LAT: usize = 1;
    pub const LON: usize = 2;
    pub const YEAR: usize = 3;
    pub const MONTH: usize = 4;
    pub const DAY: usize = 5;
    pub const HOUR: usize = 6;
    pub const MINUTE: usize = 7;
    pub const WIND_DIR: usize = 8;
    pub const WIND_SPEED: usize = 9;
    pub const WIND_GUST: usize = 10;
    pub const PRESSURE: usize = 15;
    pub const AIR_TEMP: usize = 17;

    /// Minimum token count for a usable row (through the ATMP column).
    pub const MIN_FIELDS: usize = 18;
}

/// Why a feed row was not turned into an observation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineSkip {
    #[error("line shorter than 70 characters")]
    TooShort,
    #[error("only {0} fields (need 18)")]
    TooFewFields(usize),
    #[error("invalid observation timestamp")]
    BadTimestamp,
    #[error("unparseable {0} value")]
    BadNumber(&'static str),
    #[error("observation older than 30 minutes")]
    Stale,
    #[error("no weather data to report")]
    NoWeatherData,
}

/// Map the feed's `MM` marker to `None`.
fn present(token: &str) -> Option<&str> {
    (token != MISSING).then_some(token)
}

fn parse_f64(token: &str, field: &'static str) -> Result<f64, LineSkip> {
    token.parse().map_err(|_| LineSkip::BadNumber(field))
}

/// °C → whole °F, rounded.
fn celsius_to_fahrenheit(c: f64) -> i32 {
    (c * 9.0 / 5.0 + 32.0).round() as i32
}

/// m/s → whole mph, truncated.
fn mps_to_mph(mps: f64) -> u32 {
    (mps * MPS_TO_MPH) as u32
}

/// hPa → tenths of hPa, truncated.
fn hpa_to_tenths(hpa: f64) -> u32 {
    (hpa * 10.0) as u32
}

fn parse_timestamp(
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
) -> Result<DateTime<Utc>, LineSkip> {
    let y: i32 = year.parse().map_err(|_| LineSkip::BadTimestamp)?;
    let mo: u32 = month.parse().map_err(|_| LineSkip::BadTimestamp)?;
    let d: u32 = day.parse().map_err(|_| LineSkip::BadTimestamp)?;
    let h: u32 = hour.parse().map_err(|_| LineSkip::BadTimestamp)?;
    let mi: u32 = minute.parse().map_err(|_| LineSkip::BadTimestamp)?;

    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .ok_or(LineSkip::BadTimestamp)
}

/// Parse one feed row into an observation.
///
/// `now` is injected rather than read from the clock, so the whole
/// normalizer is a pure function of (line, now). An observation exactly
/// 30 minutes old is kept; anything older is [`LineSkip::Stale`].
pub fn parse_line(line: &str, now: DateTime<Utc>) -> Result<StationObservation, LineSkip> {
    if line.len() < MIN_LINE_LEN {
        return Err(LineSkip::TooShort);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < col::MIN_FIELDS {
        return Err(LineSkip::TooFewFields(fields.len()));
    }

    let station_id = fields[col::STATION_ID].to_string();
    let latitude = parse_f64(fields[col::LAT], "latitude")?;
    let longitude = parse_f64(fields[col::LON], "longitude")?;

    let observed_at = parse_timestamp(
        fields[col::YEAR],
        fields[col::MONTH],
        fields[col::DAY],
        fields[col::HOUR],
        fields[col::MINUTE],
    )?;
    if now.signed_duration_since(observed_at) > Duration::minutes(MAX_AGE_MINUTES) {
        return Err(LineSkip::Stale);
    }

    let wind_dir_deg = present(fields[col::WIND_DIR])
        .map(|t| {
            t.parse::<u16>()
                .map_err(|_| LineSkip::BadNumber("wind direction"))
        })
        .transpose()?;
    let wind_speed_mph = present(fields[col::WIND_SPEED])
        .map(|t| parse_f64(t, "wind speed").map(mps_to_mph))
        .transpose()?;
    let wind_gust_mph = present(fields[col::WIND_GUST])
        .map(|t| parse_f64(t, "wind gust").map(mps_to_mph))
        .transpose()?;
    let temperature_f = present(fields[col::AIR_TEMP])
        .map(|t| parse_f64(t, "air temperature").map(celsius_to_fahrenheit))
        .transpose()?;
    let pressure_tenths_hpa = present(fields[col::PRESSURE])
        .map(|t| parse_f64(t, "pressure").map(hpa_to_tenths))
        .transpose()?;

    let observation = StationObservation {
        station_id,
        latitude,
        longitude,
        observed_at,
        wind_dir_deg,
        wind_speed_mph,
        wind_gust_mph,
        temperature_f,
        pressure_tenths_hpa,
    };

    if observation.has_no_weather_data() {
        return Err(LineSkip::NoWeatherData);
    }

    Ok(observation)
}

/// Parse the whole feed (header lines included) into observations,
/// preserving row order. Skipped rows are logged per line at debug and
/// summarized at info.
pub fn parse_feed(lines: &[String], now: DateTime<Utc>) -> Vec<StationObservation> {
    let mut observations = Vec::new();
    let mut malformed = 0usize;
    let mut stale = 0usize;
    let mut empty = 0usize;

    for line in lines.iter().skip(HEADER_LINES) {
        match parse_line(line, now) {
            Ok(observation) => observations.push(observation),
            Err(reason) => {
                let station = line.split_whitespace().next().unwrap_or("?");
                debug!("Skipping {}: {}", station, reason);
                match reason {
                    LineSkip::Stale => stale += 1,
                    LineSkip::NoWeatherData => empty += 1,
                    _ => malformed += 1,
                }
            }
        }
    }

    info!(
        "Total valid buoys: {} ({} malformed, {} stale, {} empty rows skipped)",
        observations.len(),
        malformed,
        stale,
        empty
    );

    observations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 13, 0, 0).unwrap()
    }

    /// A synthetic latest_obs.txt row with every column present,
    /// timestamped from `ts`. Column layout matches the real feed:
    /// STN LAT LON YYYY MM DD hh mm WDIR WSPD GST WVHT DPD APD MWD
    /// PRES PTDY ATMP WTMP DEWP VIS TIDE
    fn sample_row(ts: DateTime<Utc>) -> String {
        format!(
            "46042  36.785 -122.469 {:04} {:02} {:02} {:02} {:02} \
             150 10.0 12.0  1.5  8  6.1 270 1013.2 -1.0  15.0 14.5 12.0 MM MM",
            ts.year(),
            ts.month(),
            ts.day(),
            ts.hour(),
            ts.minute()
        )
    }

    fn row_with(wdir: &str, wspd: &str, gst: &str, pres: &str, atmp: &str) -> String {
        format!(
            "46042  36.785 -122.469 2026 08 30 12 45 \
             {wdir} {wspd} {gst}  1.5  8  6.1 270 {pres} -1.0  {atmp} 14.5 12.0 MM MM"
        )
    }

    #[test]
    fn test_parse_valid_row() {
        let obs = parse_line(&sample_row(now()), now()).unwrap();
        assert_eq!(obs.station_id, "46042");
        assert_eq!(obs.latitude, 36.785);
        assert_eq!(obs.longitude, -122.469);
        assert_eq!(obs.wind_dir_deg, Some(150));
        assert_eq!(obs.wind_speed_mph, Some(22)); // 10.0 m/s -> 22.37, truncated
        assert_eq!(obs.wind_gust_mph, Some(26)); // 12.0 m/s -> 26.84, truncated
        assert_eq!(obs.temperature_f, Some(59)); // 15.0 C
        assert_eq!(obs.pressure_tenths_hpa, Some(10132));
    }

    #[test]
    fn test_staleness_boundary() {
        let observed = Utc.with_ymd_and_hms(2026, 8, 30, 12, 30, 0).unwrap();
        let row = sample_row(observed);

        // Exactly 30 minutes old: kept
        let exactly = observed + Duration::minutes(30);
        assert!(parse_line(&row, exactly).is_ok());

        // 30 minutes and 1 second old: dropped
        let too_old = exactly + Duration::seconds(1);
        assert_eq!(parse_line(&row, too_old), Err(LineSkip::Stale));
    }

    #[test]
    fn test_future_observation_kept() {
        // Clock skew between NDBC and us should not drop fresh data
        let observed = now() + Duration::minutes(5);
        assert!(parse_line(&sample_row(observed), now()).is_ok());
    }

    #[test]
    fn test_short_line_skipped() {
        assert_eq!(parse_line("46042 36.785", now()), Err(LineSkip::TooShort));
    }

    #[test]
    fn test_too_few_fields_skipped() {
        // Long enough to pass the length gate, but only 10 tokens
        let line = format!("{:<80}", "46042 36.785 -122.469 2026 08 30 12 45 150 10.0");
        assert_eq!(parse_line(&line, now()), Err(LineSkip::TooFewFields(10)));
    }

    #[test]
    fn test_bad_timestamp_skipped() {
        let line = row_with("150", "10.0", "12.0", "1013.2", "15.0").replace(" 08 ", " 13 ");
        assert_eq!(parse_line(&line, now()), Err(LineSkip::BadTimestamp));
    }

    #[test]
    fn test_missing_marker_passes_through() {
        // A missing wind speed alone must not drop the row
        let line = row_with("150", "MM", "12.0", "1013.2", "15.0");
        let obs = parse_line(&line, now()).unwrap();
        assert_eq!(obs.wind_speed_mph, None);
        assert_eq!(obs.wind_dir_deg, Some(150));
    }

    #[test]
    fn test_all_unknown_row_dropped() {
        let line = row_with("MM", "MM", "MM", "MM", "MM");
        assert_eq!(parse_line(&line, now()), Err(LineSkip::NoWeatherData));
    }

    #[test]
    fn test_unparseable_required_field_skipped() {
        let line = row_with("150", "bogus", "12.0", "1013.2", "15.0");
        assert_eq!(
            parse_line(&line, now()),
            Err(LineSkip::BadNumber("wind speed"))
        );
    }

    #[test]
    fn test_parse_feed_skips_header_and_keeps_order() {
        let lines: Vec<String> = vec![
            "#STN LAT LON YYYY MM DD hh mm WDIR WSPD GST WVHT DPD APD MWD PRES PTDY ATMP WTMP DEWP VIS TIDE".to_string(),
            "#text degT m/s m/s m sec sec degT hPa hPa degC degC degC nmi ft".to_string(),
            sample_row(now()),
            sample_row(now()).replace("46042", "51001"),
        ];
        let observations = parse_feed(&lines, now());
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].station_id, "46042");
        assert_eq!(observations[1].station_id, "51001");
    }

    #[test]
    fn test_parse_feed_is_deterministic() {
        let lines: Vec<String> = vec![
            "header".to_string(),
            "units".to_string(),
            sample_row(now()),
        ];
        assert_eq!(parse_feed(&lines, now()), parse_feed(&lines, now()));
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32);
        assert_eq!(celsius_to_fahrenheit(-28.0), -18); // -18.4 F, rounded
        assert_eq!(celsius_to_fahrenheit(15.0), 59);
        assert_eq!(celsius_to_fahrenheit(15.5), 60); // 59.9 F
    }

    #[test]
    fn test_mps_to_mph_truncates() {
        assert_eq!(mps_to_mph(10.0), 22); // 22.3694
        assert_eq!(mps_to_mph(0.0), 0);
        assert_eq!(mps_to_mph(44.7), 99); // 99.99...
    }

    #[test]
    fn test_hpa_to_tenths_truncates() {
        assert_eq!(hpa_to_tenths(1013.2), 10132);
        assert_eq!(hpa_to_tenths(980.0), 9800);
    }
}
