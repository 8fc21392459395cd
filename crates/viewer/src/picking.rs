use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{Vec2, angular_delta};

use crate::overlay::SegmentOverlay;
use crate::spherical::{SphereProjection, SphericalMarker, YawPitch};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Weight applied to yaw differences; below 1 favours horizontal snapping.
    pub yaw_weight: f64,
    /// Maximum accepted distance as a fraction of `|pitch|` at the cursor.
    pub pitch_fraction: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            yaw_weight: 1.0 / 3.5,
            pitch_fraction: 2.0 / 3.0,
        }
    }
}

/// Index of the marker closest to `at`, if any is within reach.
///
/// Ordering contract:
/// - The smallest weighted angular distance wins.
/// - Equal distances resolve to the lower index.
///
/// The cut-off grows with how far the cursor looks up or down, so a cursor
/// on the horizon never snaps to ground markers.
pub fn nearest_marker(
    markers: &[SphericalMarker],
    at: YawPitch,
    opts: PickOptions,
) -> Option<usize> {
    let max_distance = at.pitch.abs() * opts.pitch_fraction;

    let (best, dist) = markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let dy = angular_delta(m.yaw, at.yaw) * opts.yaw_weight;
            let dp = m.pitch - at.pitch;
            (i, (dy * dy + dp * dp).sqrt())
        })
        .min_by(|a, b| stable_total_cmp_f64(a.1, b.1).then_with(|| a.0.cmp(&b.0)))?;

    (dist <= max_distance).then_some(best)
}

/// Even-odd containment test for a planar ring.
pub fn polygon_contains(ring: &[Vec2], at: Vec2) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for (i, pi) in ring.iter().enumerate() {
        let pj = ring[j];
        if (pi.y > at.y) != (pj.y > at.y) {
            let x_cross = pi.x + (at.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if at.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// First split path segment under the cursor at `at`.
///
/// The cursor ray is traced down onto each quad's ground plane and tested
/// there in metres. Straight ground edges bend strongly on the sphere near
/// the viewer's feet, so testing in yaw/pitch would miss them.
pub fn pick_segment<'a>(
    segments: &'a [SegmentOverlay],
    at: YawPitch,
    projection: &SphereProjection,
) -> Option<&'a SegmentOverlay> {
    segments.iter().find(|s| {
        let plane_up = s.ground.iter().map(|v| v.up).sum::<f64>() / s.ground.len() as f64;
        projection
            .ground_point(at, plane_up)
            .is_some_and(|p| polygon_contains(&s.ground.map(|v| v.horizontal()), p))
    })
}
