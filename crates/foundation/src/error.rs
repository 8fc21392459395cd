/// Recoverable geometry failures.
///
/// None of these abort a rendering pass: callers skip the offending point or
/// segment and carry on with the rest of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Non-finite or out-of-range longitude/latitude/elevation.
    InvalidCoordinate { lon_deg: f64, lat_deg: f64 },
    /// Two consecutive centerline points coincide; `index` is the segment start.
    DegenerateSegment { index: usize },
    /// Fewer than two centerline points, or a non-positive width.
    DegenerateRibbon { points: usize, width: f64 },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::InvalidCoordinate { lon_deg, lat_deg } => {
                write!(f, "invalid coordinate: lon={lon_deg} lat={lat_deg}")
            }
            GeometryError::DegenerateSegment { index } => {
                write!(f, "degenerate segment {index}: coincident points")
            }
            GeometryError::DegenerateRibbon { points, width } => {
                write!(f, "degenerate ribbon: points={points} width={width}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
