//! Encoded polyline codec (precision 1e5), as used by openrouteservice
//! for route geometries. Coordinates are `(lat, lon)` pairs.

use super::error::RoutingError;

const PRECISION: f64 = 1e5;

/// Decodes an encoded polyline string into `(lat, lon)` pairs.
pub fn decode(encoded: &str) -> Result<Vec<(f64, f64)>, RoutingError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut coords = Vec::with_capacity(bytes.len() / 4);

    while index < bytes.len() {
        lat = accumulate(lat, next_value(bytes, &mut index)?, index)?;
        if index >= bytes.len() {
            return Err(RoutingError::MalformedResponse(format!(
                "polyline ends after a latitude at byte {}",
                index
            )));
        }
        lon = accumulate(lon, next_value(bytes, &mut index)?, index)?;
        coords.push((lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Ok(coords)
}

/// Encodes `(lat, lon)` pairs into a polyline string.
pub fn encode(coords: &[(f64, f64)]) -> String {
    let mut out = String::with_capacity(coords.len() * 8);
    let mut prev = (0i64, 0i64);

    for &(lat, lon) in coords {
        let lat = (lat * PRECISION).round() as i64;
        let lon = (lon * PRECISION).round() as i64;
        push_value(&mut out, lat - prev.0);
        push_value(&mut out, lon - prev.1);
        prev = (lat, lon);
    }

    out
}

fn accumulate(total: i64, delta: i64, index: usize) -> Result<i64, RoutingError> {
    total.checked_add(delta).ok_or_else(|| {
        RoutingError::MalformedResponse(format!("polyline coordinate overflows at byte {}", index))
    })
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, RoutingError> {
    let mut result: u64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or_else(|| {
            RoutingError::MalformedResponse(format!("polyline truncated at byte {}", index))
        })?;
        if !(63..=126).contains(&byte) {
            return Err(RoutingError::MalformedResponse(format!(
                "invalid polyline character {:?} at byte {}",
                byte as char, index
            )));
        }
        *index += 1;

        let chunk = u64::from(byte - 63);
        // only 4 bits are left at shift 60
        if shift > 60 || (shift == 60 && chunk & 0x1f > 0x0f) {
            return Err(RoutingError::MalformedResponse(format!(
                "polyline value overflows 64 bits at byte {}",
                *index - 1
            )));
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

fn push_value(out: &mut String, value: i64) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}
