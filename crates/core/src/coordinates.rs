//! Coordinate normalization
//!
//! The node stores coordinates as `int64` micro-degrees (`37566500`), while
//! older records and hand-submitted claims carry plain degrees (`37.5665`).
//! There is no unit field, so any magnitude above [`SCALED_THRESHOLD`] is
//! taken to be micro-degrees.

use serde_json::Value as JsonValue;

/// Values with a larger magnitude are fixed-point micro-degrees
pub const SCALED_THRESHOLD: f64 = 1000.0;

/// Fixed-point scale used by the node
pub const SCALE: f64 = 1_000_000.0;

/// Latitude used when a claim has none (micro-degrees)
pub const DEFAULT_SCALED_LATITUDE: f64 = 37_566_500.0;

/// Longitude used when a claim has none (micro-degrees)
pub const DEFAULT_SCALED_LONGITUDE: f64 = 126_978_000.0;

/// A normalized coordinate pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Fallback pair for claims whose coordinates cannot be read (Seoul City Hall)
    pub const FALLBACK: Position = Position {
        latitude: 37.5665,
        longitude: 126.9780,
    };

    /// GeoJSON position: `[longitude, latitude]`
    pub fn to_geojson(self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }
}

/// Read a raw coordinate as a float.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace ignored).
/// Returns `None` for anything else, including non-finite values.
pub fn parse_degrees(value: &JsonValue) -> Option<f64> {
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Convert micro-degrees to degrees; smaller values pass through.
fn descale(raw: f64) -> f64 {
    if raw.abs() > SCALED_THRESHOLD {
        raw / SCALE
    } else {
        raw
    }
}

/// Normalize a claim's raw latitude/longitude into degrees.
///
/// Missing values default to the scaled fallback coordinates. If either value
/// is present but unreadable, the whole pair becomes [`Position::FALLBACK`].
pub fn normalize(latitude: Option<&JsonValue>, longitude: Option<&JsonValue>) -> Position {
    let raw_latitude = match latitude {
        Some(value) => parse_degrees(value),
        None => Some(DEFAULT_SCALED_LATITUDE),
    };
    let raw_longitude = match longitude {
        Some(value) => parse_degrees(value),
        None => Some(DEFAULT_SCALED_LONGITUDE),
    };

    match (raw_latitude, raw_longitude) {
        (Some(lat), Some(lng)) => Position {
            latitude: descale(lat),
            longitude: descale(lng),
        },
        _ => Position::FALLBACK,
    }
}
