use foundation::GeometryError;
use foundation::math::{Enu, GeoPoint, ReferencePosition, geodetic_to_enu};
use tracing::{debug, warn};

/// Horizontal offset beyond which the flat-Earth projection is reported as
/// out of range. Output is not altered.
pub const FLAT_EARTH_RANGE_M: f64 = 1_000.0;

/// The viewer's geographic position and the tangent plane anchored on it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReferenceFrame {
    position: ReferencePosition,
}

impl ReferenceFrame {
    pub fn new(position: ReferencePosition) -> Self {
        Self { position }
    }

    pub fn position(&self) -> ReferencePosition {
        self.position
    }

    pub fn set_position(&mut self, position: ReferencePosition) {
        debug!(
            lon = position.lon_deg,
            lat = position.lat_deg,
            elev = position.elev_m,
            "reference position changed"
        );
        self.position = position;
    }

    pub fn project(&self, point: GeoPoint) -> Result<Enu, GeometryError> {
        let enu = geodetic_to_enu(point, self.position)?;
        let horizontal = enu.horizontal_distance();
        if horizontal > FLAT_EARTH_RANGE_M {
            warn!(
                distance_m = horizontal,
                "point beyond flat-Earth approximation range"
            );
        }
        Ok(enu)
    }
}
