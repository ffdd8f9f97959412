use serde_json::Value;
use tracing::info;
use crate::earth_position::GeoPosition;
use crate::error::TrackerError;
use crate::fetcher::Fetcher;
use crate::time::Timestamp;

const ENDPOINT: &str = "iss-pass";

/// Fixed ground observer the pass prediction is made for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Observer {
    pub(crate) name: &'static str,
    pub(crate) position: GeoPosition,
}

impl Observer {
    pub(crate) const INDIANAPOLIS: Observer = Observer {
        name: "Indianapolis",
        position: GeoPosition { latitude: 39.7684, longitude: -86.1581 },
    };

    fn query(&self) -> [(&'static str, String); 2] {
        [
            ("lat", self.position.latitude.to_string()),
            ("lon", self.position.longitude.to_string()),
        ]
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct OverheadPassInfo {
    pub(crate) pass_time: Timestamp,
    pub(crate) observer_latitude: f64,
    pub(crate) observer_longitude: f64,
}

impl OverheadPassInfo {
    pub(crate) fn observer(&self) -> GeoPosition {
        GeoPosition::new(self.observer_latitude, self.observer_longitude)
    }
}

/// Next rise of the station over `observer`. Fetch failures end the process.
pub(crate) fn compute_overhead_pass(fetcher: &Fetcher, url: &str,
                                    observer: Observer) -> Result<OverheadPassInfo, TrackerError> {
    let json = fetcher.fetch_or_exit(url, Some(&observer.query()[..]));
    let pass = parse_overhead_pass(&json, observer)?;

    info!(observer = observer.name, pass_time = %pass.pass_time, "next overhead pass");
    Ok(pass)
}

///
/// Reads the first `risetime` of the `response` list of an iss-pass answer.
///
pub(crate) fn parse_overhead_pass(json: &Value, observer: Observer) -> Result<OverheadPassInfo, TrackerError> {
    let passes = json.get("response")
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "response"))?;
    let first = passes.as_array()
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, "response", passes))?
        .first()
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "response[0]"))?;

    let rise_time = first.get("risetime")
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "response[0].risetime"))?;
    let pass_time = Timestamp::from_json(rise_time)
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, "response[0].risetime", rise_time))?;

    Ok(OverheadPassInfo {
        pass_time,
        observer_latitude: observer.position.latitude,
        observer_longitude: observer.position.longitude,
    })
}
