use core::f64::consts::FRAC_PI_2;

use foundation::math::{Enu, Vec2, wrap_full_turn};
use serde::{Deserialize, Serialize};

/// Horizontal distance under which a point counts as straight above/below.
pub const HORIZONTAL_EPSILON_M: f64 = 1e-9;

/// Renderer-facing placement of a point on the viewing sphere.
///
/// `yaw` is in `[0, 2π)`, `pitch` in `[-π/2, π/2]`, `distance` in metres.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphericalMarker {
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
}

impl SphericalMarker {
    pub fn yaw_pitch(&self) -> YawPitch {
        YawPitch {
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

/// A direction on the viewing sphere, in radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct YawPitch {
    pub yaw: f64,
    pub pitch: f64,
}

impl YawPitch {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

/// Pulls a point toward the ground by `ground_tilt_deg`, proportionally to
/// its horizontal distance, so distant path geometry hugs the terrain.
pub fn apply_ground_tilt(v: Enu, ground_tilt_deg: f64) -> Enu {
    let drop = ground_tilt_deg.to_radians().sin() * v.horizontal_distance();
    Enu::new(v.east, v.north, v.up - drop)
}

/// Projects an ENU offset onto the viewing sphere.
///
/// Yaw is measured clockwise from north, offset by `heading_correction_rad`
/// and wrapped into `[0, 2π)`. A point straight above or below the viewer
/// has no defined bearing; its yaw is the wrapped heading correction alone.
pub fn to_spherical(
    v: Enu,
    heading_correction_rad: f64,
    ground_tilt_deg: Option<f64>,
) -> SphericalMarker {
    let v = match ground_tilt_deg {
        Some(deg) => apply_ground_tilt(v, deg),
        None => v,
    };

    let horizontal = v.horizontal_distance();
    let (bearing, pitch) = if horizontal < HORIZONTAL_EPSILON_M {
        let pitch = if v.up > 0.0 {
            FRAC_PI_2
        } else if v.up < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        };
        (0.0, pitch)
    } else {
        (
            v.east.atan2(v.north),
            v.up.atan2(horizontal).clamp(-FRAC_PI_2, FRAC_PI_2),
        )
    };

    SphericalMarker {
        yaw: wrap_full_turn(bearing + heading_correction_rad),
        pitch,
        distance: v.distance(),
    }
}

/// The heading and ground tilt a frame projects with, kept so renderer
/// coordinates can be traced back onto the ground.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereProjection {
    pub heading_correction_rad: f64,
    pub ground_tilt_deg: Option<f64>,
}

impl SphereProjection {
    pub fn project(&self, v: Enu) -> SphericalMarker {
        to_spherical(v, self.heading_correction_rad, self.ground_tilt_deg)
    }

    /// Inverse of [`Self::project`] onto the horizontal plane `plane_up`
    /// metres from the eye.
    ///
    /// Returns `None` when the direction never meets the plane.
    pub fn ground_point(&self, at: YawPitch, plane_up: f64) -> Option<Vec2> {
        let tilt = self.ground_tilt_deg.map_or(0.0, |deg| deg.to_radians().sin());
        // Projection maps up to `up - tilt * h`, so tan(pitch) = up / h - tilt.
        let horizontal = plane_up / (at.pitch.tan() + tilt);
        if !horizontal.is_finite() || horizontal <= 0.0 {
            return None;
        }
        let bearing = at.yaw - self.heading_correction_rad;
        Some(Vec2::new(bearing.sin(), bearing.cos()).scale(horizontal))
    }
}
