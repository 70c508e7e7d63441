//! APRS position encoding (degrees and decimal minutes)

/// Encode a latitude as `DDMM.mmN` / `DDMM.mmS`.
pub fn encode_latitude(value: f64) -> String {
    let (degrees, minutes) = split_degrees(value);
    let direction = if value >= 0.0 { 'N' } else { 'S' };
    format!("{degrees:02}{minutes:05.2}{direction}")
}

/// Encode a longitude as `DDDMM.mmE` / `DDDMM.mmW` (3-digit degrees).
pub fn encode_longitude(value: f64) -> String {
    let (degrees, minutes) = split_degrees(value);
    let direction = if value >= 0.0 { 'E' } else { 'W' };
    format!("{degrees:03}{minutes:05.2}{direction}")
}

fn split_degrees(value: f64) -> (u32, f64) {
    let degrees = value.abs().trunc();
    let minutes = (value.abs() - degrees) * 60.0;
    (degrees as u32, minutes)
}
