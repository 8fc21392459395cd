use foundation::math::Enu;
use tracing::warn;

/// Horizontal length below which a segment is treated as zero-length.
pub const SEGMENT_EPSILON_M: f64 = 1e-6;

/// A centerline with coincident neighbours removed.
///
/// `source_indices[k]` is the position of `points[k]` in the caller's input,
/// so segment metadata can still name the input points.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanCenterline {
    pub points: Vec<Enu>,
    pub source_indices: Vec<usize>,
}

/// Drops every point that coincides horizontally with the last kept point.
///
/// Each drop corresponds to one zero-length segment being skipped; the rest
/// of the path survives.
pub fn drop_coincident(points: &[Enu]) -> CleanCenterline {
    let mut out = CleanCenterline {
        points: Vec::with_capacity(points.len()),
        source_indices: Vec::with_capacity(points.len()),
    };

    for (i, p) in points.iter().enumerate() {
        if let Some(last) = out.points.last() {
            let len = (p.horizontal() - last.horizontal()).length();
            if len < SEGMENT_EPSILON_M {
                warn!(segment = i - 1, "skipping zero-length path segment");
                continue;
            }
        }
        out.points.push(*p);
        out.source_indices.push(i);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::drop_coincident;
    use foundation::math::Enu;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_distinct_points_untouched() {
        let pts = vec![Enu::new(0.0, 0.0, 0.0), Enu::new(5.0, 0.0, 0.0)];
        let clean = drop_coincident(&pts);
        assert_eq!(clean.points, pts);
        assert_eq!(clean.source_indices, vec![0, 1]);
    }

    #[test]
    fn skips_repeated_points_but_remembers_sources() {
        let pts = vec![
            Enu::new(0.0, 0.0, 0.0),
            Enu::new(0.0, 0.0, 2.0),
            Enu::new(5.0, 0.0, 0.0),
            Enu::new(5.0, 0.0, 0.0),
            Enu::new(5.0, 5.0, 0.0),
        ];
        let clean = drop_coincident(&pts);
        assert_eq!(clean.source_indices, vec![0, 2, 4]);
        assert_eq!(clean.points[1], Enu::new(5.0, 0.0, 0.0));
    }
}
