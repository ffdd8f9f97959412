use serde_json::{Map, Value};
use crate::earth_position::GeoPosition;
use crate::error::TrackerError;
use crate::time::Timestamp;

const ENDPOINT: &str = "iss-now";

/// Instantaneous location of the station.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Position {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) observed_at: Timestamp,
}

impl Position {
    pub(crate) fn geo(&self) -> GeoPosition {
        GeoPosition::new(self.latitude, self.longitude)
    }

    /// Console line for the station, `Lat: .. Lon: .. Time: ..`.
    pub(crate) fn report(&self) -> String {
        format!("Lat: {} Lon: {} Time: {}", self.latitude, self.longitude, self.observed_at)
    }
}

/// Coordinates arrive either as JSON numbers or as numeric strings.
fn coordinate(holder: &Map<String, Value>, field: &str) -> Result<f64, TrackerError> {
    let value = holder.get(field)
        .ok_or_else(|| TrackerError::missing(ENDPOINT, field))?;
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|degrees| degrees.is_finite())
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, field, value))
}

///
/// Extracts the station position from an iss-now response.
///
/// The coordinates live in the first nested object holding both `latitude`
/// and `longitude`, whatever its key; `timestamp` sits at the top level.
///
pub(crate) fn parse_position(json: &Value) -> Result<Position, TrackerError> {
    let root = json.as_object()
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, "<root>", json))?;

    let holder = root.values()
        .filter_map(Value::as_object)
        .find(|object| object.contains_key("latitude") && object.contains_key("longitude"))
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "latitude/longitude"))?;

    let latitude = coordinate(holder, "latitude")?;
    if !GeoPosition::latitude_in_range(latitude) {
        return Err(TrackerError::invalid(ENDPOINT, "latitude", latitude));
    }
    let longitude = coordinate(holder, "longitude")?;
    if !GeoPosition::longitude_in_range(longitude) {
        return Err(TrackerError::invalid(ENDPOINT, "longitude", longitude));
    }

    let timestamp = root.get("timestamp")
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "timestamp"))?;
    let observed_at = Timestamp::from_json(timestamp)
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, "timestamp", timestamp))?;

    Ok(Position { latitude, longitude, observed_at })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn test_string_coordinates() {
        let json = json!({
            "iss_position": {"latitude": "10.5", "longitude": "-20.25"},
            "timestamp": 1000,
        });

        assert_eq!(parse_position(&json).unwrap(), Position {
            latitude: 10.5,
            longitude: -20.25,
            observed_at: Timestamp(1000),
        });
    }

    #[test]
    fn test_live_response() {
        let json = json!({
            "message": "success",
            "timestamp": 1_700_000_000,
            "iss_position": {"longitude": "-86.1581", "latitude": "39.7684"},
        });
        let position = parse_position(&json).unwrap();

        assert_float_absolute_eq!(position.latitude, 39.7684, 1e-9);
        assert_float_absolute_eq!(position.longitude, -86.1581, 1e-9);
        assert_eq!(position.report(), "Lat: 39.7684 Lon: -86.1581 Time: Tue Nov 14 22:13:20 2023");
    }

    #[test]
    fn test_any_key_numeric() {
        let json = json!({
            "timestamp": 42,
            "metadata": {"source": "test"},
            "station": {"latitude": -51.0, "longitude": 179.5},
        });
        let position = parse_position(&json).unwrap();

        assert_float_absolute_eq!(position.latitude, -51.0, 1e-9);
        assert_float_absolute_eq!(position.longitude, 179.5, 1e-9);
        assert_eq!(position.observed_at, Timestamp(42));
    }

    #[test]
    fn test_missing_coordinates() {
        let json = json!({
            "timestamp": 1000,
            "iss_position": {"latitude": "10.5"},
        });

        assert!(matches!(parse_position(&json), Err(TrackerError::MissingField { .. })));
        assert!(matches!(parse_position(&json!({"timestamp": 1000})),
                         Err(TrackerError::MissingField { .. })));
    }

    #[test]
    fn test_missing_timestamp() {
        let json = json!({"iss_position": {"latitude": "1", "longitude": "2"}});

        assert!(matches!(parse_position(&json),
                         Err(TrackerError::MissingField { field, .. }) if field == "timestamp"));
    }

    #[test]
    fn test_unusable_coordinates() {
        let not_a_number = json!({"timestamp": 1, "p": {"latitude": "north", "longitude": "0"}});
        let out_of_range = json!({"timestamp": 1, "p": {"latitude": "95.0", "longitude": "0"}});

        assert!(matches!(parse_position(&not_a_number), Err(TrackerError::InvalidField { .. })));
        assert!(matches!(parse_position(&out_of_range), Err(TrackerError::InvalidField { .. })));
    }

    #[test]
    fn test_idempotent() {
        let json = json!({"timestamp": 5, "iss_position": {"latitude": "1.5", "longitude": "2.5"}});
        assert_eq!(parse_position(&json).unwrap(), parse_position(&json).unwrap());
    }
}
