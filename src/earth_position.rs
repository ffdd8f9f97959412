/// A point on the Earth's surface, in degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct GeoPosition {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl GeoPosition {
    pub(crate) const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    pub(crate) const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    pub(crate) fn new(latitude: f64, longitude: f64) -> GeoPosition {
        GeoPosition { latitude, longitude }
    }

    pub(crate) fn latitude_in_range(latitude: f64) -> bool {
        (Self::LATITUDE_RANGE.0..=Self::LATITUDE_RANGE.1).contains(&latitude)
    }

    pub(crate) fn longitude_in_range(longitude: f64) -> bool {
        (Self::LONGITUDE_RANGE.0..=Self::LONGITUDE_RANGE.1).contains(&longitude)
    }
}

///
/// Flat canvas whose world coordinates are geographic degrees: longitude
/// [-180, 180] runs left to right, latitude [-90, 90] bottom to top.
///
/// There is no projection, a degree is a world unit on both axes.
///
#[derive(Debug, Copy, Clone)]
pub(crate) struct WorldCanvas {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl WorldCanvas {
    pub(crate) fn new(width: f32, height: f32) -> WorldCanvas {
        WorldCanvas { width, height }
    }

    /// Screen pixel for a world point. Screen y grows downwards.
    pub(crate) fn to_screen(&self, position: GeoPosition) -> (f32, f32) {
        let (min_lon, max_lon) = GeoPosition::LONGITUDE_RANGE;
        let (min_lat, max_lat) = GeoPosition::LATITUDE_RANGE;

        let x = (position.longitude - min_lon) / (max_lon - min_lon) * f64::from(self.width);
        let y = (max_lat - position.latitude) / (max_lat - min_lat) * f64::from(self.height);

        (x as f32, y as f32)
    }
}
