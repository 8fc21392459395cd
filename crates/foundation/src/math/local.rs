use super::{GeoPoint, METRES_PER_DEGREE_LAT, ReferencePosition, Vec2, metres_per_degree_lon};
use crate::GeometryError;

/// Local East-North-Up coordinates (meters).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    pub fn horizontal(self) -> Vec2 {
        Vec2::new(self.east, self.north)
    }

    pub fn horizontal_distance(self) -> f64 {
        self.horizontal().length()
    }

    pub fn distance(self) -> f64 {
        (self.east * self.east + self.north * self.north + self.up * self.up).sqrt()
    }

    /// Replaces the horizontal components, carrying `up` through unchanged.
    pub fn with_horizontal(self, h: Vec2) -> Self {
        Self::new(h.x, h.y, self.up)
    }
}

/// Flat-Earth projection of `point` into the tangent plane at `origin`.
///
/// Valid over tens to low hundreds of metres; no ellipsoid is involved.
pub fn geodetic_to_enu(point: GeoPoint, origin: ReferencePosition) -> Result<Enu, GeometryError> {
    point.validate()?;

    let east = (point.lon_deg - origin.lon_deg) * metres_per_degree_lon(origin.lat_deg);
    let north = (point.lat_deg - origin.lat_deg) * METRES_PER_DEGREE_LAT;
    let up = point.elevation_or_default() - origin.elev_m;

    Ok(Enu::new(east, north, up))
}
