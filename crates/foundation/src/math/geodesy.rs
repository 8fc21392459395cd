use crate::GeometryError;

/// Metres spanned by one degree of latitude (flat-Earth constant).
pub const METRES_PER_DEGREE_LAT: f64 = 111_320.0;

/// Elevation used for points supplied without one: slightly below the camera,
/// which anchors ground-level markers visually.
pub const DEFAULT_POINT_ELEVATION_M: f64 = -1.5;

/// Metres spanned by one degree of longitude at `lat_deg`.
///
/// Scales the latitude constant by `cos(lat)` to account for meridian convergence.
pub fn metres_per_degree_lon(lat_deg: f64) -> f64 {
    METRES_PER_DEGREE_LAT * lat_deg.to_radians().cos()
}

/// A geographic point in degrees, with optional elevation in metres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub elev_m: Option<f64>,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            elev_m: None,
        }
    }

    pub fn with_elevation(lon_deg: f64, lat_deg: f64, elev_m: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            elev_m: Some(elev_m),
        }
    }

    /// Elevation, falling back to [`DEFAULT_POINT_ELEVATION_M`].
    pub fn elevation_or_default(&self) -> f64 {
        self.elev_m.unwrap_or(DEFAULT_POINT_ELEVATION_M)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_lon_lat(self.lon_deg, self.lat_deg)?;
        match self.elev_m {
            Some(e) if !e.is_finite() => Err(self.invalid()),
            _ => Ok(()),
        }
    }

    fn invalid(&self) -> GeometryError {
        GeometryError::InvalidCoordinate {
            lon_deg: self.lon_deg,
            lat_deg: self.lat_deg,
        }
    }
}

/// The viewer's geographic position. Elevation is always known.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReferencePosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub elev_m: f64,
}

impl ReferencePosition {
    pub fn new(lon_deg: f64, lat_deg: f64, elev_m: f64) -> Result<Self, GeometryError> {
        validate_lon_lat(lon_deg, lat_deg)?;
        if !elev_m.is_finite() {
            return Err(GeometryError::InvalidCoordinate { lon_deg, lat_deg });
        }
        Ok(Self {
            lon_deg,
            lat_deg,
            elev_m,
        })
    }
}

fn validate_lon_lat(lon_deg: f64, lat_deg: f64) -> Result<(), GeometryError> {
    let ok = lon_deg.is_finite()
        && lat_deg.is_finite()
        && (-180.0..=180.0).contains(&lon_deg)
        && (-90.0..=90.0).contains(&lat_deg);
    if ok {
        Ok(())
    } else {
        Err(GeometryError::InvalidCoordinate { lon_deg, lat_deg })
    }
}
