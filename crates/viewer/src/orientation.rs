use foundation::math::{wrap_full_turn, wrap_into};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Pan,
    Tilt,
    Roll,
}

/// Wraparound range of one correction component.
///
/// Only two shapes exist: a full turn `[0, 2π)`, or a range symmetric about
/// zero, `[-bound, bound]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotationLimits {
    FullTurn,
    Symmetric { bound_deg: f64 },
}

impl RotationLimits {
    pub fn full_turn() -> Self {
        RotationLimits::FullTurn
    }

    pub fn symmetric(bound_deg: f64) -> Self {
        RotationLimits::Symmetric { bound_deg }
    }

    fn is_valid(&self) -> bool {
        match *self {
            RotationLimits::FullTurn => true,
            RotationLimits::Symmetric { bound_deg } => bound_deg.is_finite() && bound_deg > 0.0,
        }
    }

    /// Brings `rad` into range by whole multiples of the range width.
    pub fn normalize(&self, rad: f64) -> f64 {
        match *self {
            RotationLimits::FullTurn => wrap_full_turn(rad),
            RotationLimits::Symmetric { bound_deg } => {
                let b = bound_deg.to_radians();
                wrap_into(rad, -b, b)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationLimits {
    pub pan: RotationLimits,
    pub tilt: RotationLimits,
    pub roll: RotationLimits,
}

impl Default for OrientationLimits {
    fn default() -> Self {
        Self {
            pan: RotationLimits::full_turn(),
            tilt: RotationLimits::symmetric(90.0),
            roll: RotationLimits::symmetric(180.0),
        }
    }
}

impl OrientationLimits {
    pub fn get(&self, component: Component) -> RotationLimits {
        match component {
            Component::Pan => self.pan,
            Component::Tilt => self.tilt,
            Component::Roll => self.roll,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrientationError {
    InvalidLimits { component: Component, bound_deg: f64 },
}

impl std::fmt::Display for OrientationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrientationError::InvalidLimits {
                component,
                bound_deg,
            } => write!(
                f,
                "invalid {component:?} limits: bound must be finite and positive, got {bound_deg}"
            ),
        }
    }
}

impl std::error::Error for OrientationError {}

/// Counter-rotation the renderer applies to the sphere: the negated corrections.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereCorrection {
    pub pan: f64,
    pub tilt: f64,
    pub roll: f64,
}

/// Pan/tilt/roll corrections in radians, each kept inside its limits.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationCorrection {
    pan: f64,
    tilt: f64,
    roll: f64,
    limits: OrientationLimits,
}

impl Default for OrientationCorrection {
    fn default() -> Self {
        Self {
            pan: 0.0,
            tilt: 0.0,
            roll: 0.0,
            limits: OrientationLimits::default(),
        }
    }
}

impl OrientationCorrection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: OrientationLimits) -> Result<Self, OrientationError> {
        for component in [Component::Pan, Component::Tilt, Component::Roll] {
            let l = limits.get(component);
            if !l.is_valid() {
                let bound_deg = match l {
                    RotationLimits::Symmetric { bound_deg } => bound_deg,
                    RotationLimits::FullTurn => 0.0,
                };
                return Err(OrientationError::InvalidLimits {
                    component,
                    bound_deg,
                });
            }
        }
        Ok(Self {
            limits,
            ..Self::default()
        })
    }

    pub fn limits(&self) -> &OrientationLimits {
        &self.limits
    }

    /// Current value of `component`, in radians.
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Pan => self.pan,
            Component::Tilt => self.tilt,
            Component::Roll => self.roll,
        }
    }

    /// Sets an absolute correction, given in degrees.
    ///
    /// Meant for a panorama about to be shown; use [`Self::rotate`] for live
    /// adjustments.
    pub fn set_correction(&mut self, angle_deg: f64, component: Component) {
        self.store(angle_deg.to_radians(), component);
    }

    /// Adds `delta_deg` to the current correction and re-normalizes.
    pub fn rotate(&mut self, delta_deg: f64, component: Component) {
        self.store(self.get(component) + delta_deg.to_radians(), component);
    }

    /// Pan correction, fed to yaw projection as the heading offset.
    pub fn composed_heading(&self) -> f64 {
        self.pan
    }

    pub fn sphere_correction(&self) -> SphereCorrection {
        SphereCorrection {
            pan: -self.pan,
            tilt: -self.tilt,
            roll: -self.roll,
        }
    }

    fn store(&mut self, rad: f64, component: Component) {
        if !rad.is_finite() {
            warn!(?component, "ignoring non-finite orientation correction");
            return;
        }
        let value = self.limits.get(component).normalize(rad);
        match component {
            Component::Pan => self.pan = value,
            Component::Tilt => self.tilt = value,
            Component::Roll => self.roll = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Component, OrientationCorrection, OrientationError, OrientationLimits, RotationLimits,
    };
    use core::f64::consts::{FRAC_PI_2, PI, TAU};
    use pretty_assertions::assert_eq;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    const ALL: [Component; 3] = [Component::Pan, Component::Tilt, Component::Roll];

    fn in_range(c: &OrientationCorrection, component: Component) -> bool {
        let v = c.get(component);
        match component {
            Component::Pan => (0.0..TAU).contains(&v),
            Component::Tilt => (-FRAC_PI_2..=FRAC_PI_2).contains(&v),
            Component::Roll => (-PI..=PI).contains(&v),
        }
    }

    #[test]
    fn set_correction_always_lands_in_range() {
        let mut c = OrientationCorrection::new();
        for step in -50..=50 {
            let angle = step as f64 * 37.3;
            for component in ALL {
                c.set_correction(angle, component);
                assert!(in_range(&c, component), "{component:?} at {angle}");
            }
        }
    }

    #[test]
    fn set_correction_converts_degrees() {
        let mut c = OrientationCorrection::new();
        c.set_correction(90.0, Component::Pan);
        assert_close(c.get(Component::Pan), FRAC_PI_2, 1e-12);
        c.set_correction(-90.0, Component::Pan);
        assert_close(c.get(Component::Pan), 3.0 * FRAC_PI_2, 1e-12);
        c.set_correction(45.0, Component::Tilt);
        assert_close(c.get(Component::Tilt), FRAC_PI_2 / 2.0, 1e-12);
        c.set_correction(90.0, Component::Tilt);
        assert_close(c.get(Component::Tilt), FRAC_PI_2, 1e-12);
    }

    #[test]
    fn full_circle_of_rotations_returns_home() {
        for component in ALL {
            let mut c = OrientationCorrection::new();
            c.set_correction(30.0, component);
            let start = c.get(component);
            for _ in 0..24 {
                c.rotate(15.0, component);
                assert!(in_range(&c, component));
            }
            assert_close(c.get(component), start, 1e-9);

            for _ in 0..36 {
                c.rotate(-10.0, component);
            }
            assert_close(c.get(component), start, 1e-9);
        }
    }

    #[test]
    fn composed_heading_is_pan() {
        let mut c = OrientationCorrection::new();
        c.set_correction(12.0, Component::Pan);
        c.set_correction(3.0, Component::Tilt);
        assert_eq!(c.composed_heading(), c.get(Component::Pan));
        let s = c.sphere_correction();
        assert_eq!(s.pan, -c.get(Component::Pan));
        assert_eq!(s.tilt, -c.get(Component::Tilt));
    }

    #[test]
    fn custom_limits() {
        let limits = OrientationLimits {
            pan: RotationLimits::symmetric(180.0),
            ..OrientationLimits::default()
        };
        let mut c = OrientationCorrection::with_limits(limits).unwrap();
        c.set_correction(270.0, Component::Pan);
        assert_close(c.get(Component::Pan), -FRAC_PI_2, 1e-12);

        let bad = OrientationLimits {
            roll: RotationLimits::symmetric(0.0),
            ..OrientationLimits::default()
        };
        assert_eq!(
            OrientationCorrection::with_limits(bad),
            Err(OrientationError::InvalidLimits {
                component: Component::Roll,
                bound_deg: 0.0
            })
        );
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut c = OrientationCorrection::new();
        c.set_correction(20.0, Component::Roll);
        c.set_correction(f64::NAN, Component::Roll);
        assert_close(c.get(Component::Roll), 20f64.to_radians(), 1e-12);
    }

    #[test]
    fn limits_deserialize_from_config() {
        let limits: OrientationLimits = serde_json::from_str(
            r#"{"pan": {"kind": "symmetric", "bound_deg": 180.0}, "tilt": {"kind": "full_turn"}}"#,
        )
        .unwrap();
        assert_eq!(limits.pan, RotationLimits::symmetric(180.0));
        assert_eq!(limits.tilt, RotationLimits::full_turn());
        assert_eq!(limits.roll, RotationLimits::symmetric(180.0));
    }
}
